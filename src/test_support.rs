//! Fixture builders shared by the unit tests.

use std::sync::Once;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use crate::model::raw::{
    Creator, FieldValueConnection, FieldValueNode, ItemConnection, ItemNode, ProjectFieldDef,
    ProjectNode,
};

static INIT: Once = Once::new();

pub fn init_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

pub fn field(name: &str, value: &str, created_at: &str) -> FieldValueNode {
    FieldValueNode {
        created_at: Some(created_at.to_string()),
        creator: Some(Creator {
            login: "octocat".into(),
        }),
        database_id: Some(1),
        id: Some(format!("PNIF_{name}")),
        project_field: ProjectFieldDef {
            name: name.to_string(),
            settings: Some("null".into()),
        },
        value: Value::String(value.to_string()),
    }
}

pub fn choice_field(name: &str, option_id: &str, options: &[(&str, &str)]) -> FieldValueNode {
    let options: Vec<Value> = options
        .iter()
        .map(|(id, label)| serde_json::json!({ "id": id, "name": label }))
        .collect();
    let settings = serde_json::json!({ "width": 120, "options": options }).to_string();

    let mut node = field(name, option_id, "2024-01-01T10:00:00Z");
    node.project_field.settings = Some(settings);
    node
}

pub fn item(id: &str, fields: Vec<FieldValueNode>) -> ItemNode {
    let title = fields
        .iter()
        .find(|f| f.project_field.name == "Title")
        .and_then(|f| f.value.as_str())
        .map(String::from);
    ItemNode {
        title,
        id: id.to_string(),
        field_values: FieldValueConnection { nodes: fields },
    }
}

/// Title first, then Status s1 -> Done, Deadline, Priority p1 -> High, Members, Notes.
pub fn sample_item(id: &str, title: &str) -> ItemNode {
    item(
        id,
        vec![
            field("Title", title, "2024-01-01T09:00:00Z"),
            choice_field("Status", "s1", &[("s0", "Todo"), ("s1", "Done")]),
            field("Deadline", "2024-01-02T10:00:00+00:00", "2024-01-01T11:00:00Z"),
            choice_field("Priority", "p1", &[("p1", "High"), ("p2", "Low")]),
            field("Members", "alice", "2024-01-01T12:00:00Z"),
            field("Notes", "n", "2024-01-01T13:00:00Z"),
        ],
    )
}

pub fn project_node(title: &str, items: Vec<ItemNode>) -> ProjectNode {
    ProjectNode {
        title: title.to_string(),
        url: "https://github.com/users/octocat/projects/1".into(),
        items: ItemConnection { nodes: items },
    }
}

/// Answers one HTTP request per response, in order, on a loopback port.
/// The handle yields the raw requests.
pub async fn serve_responses(responses: Vec<(String, String)>) -> (String, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let mut requests = Vec::new();
        for (status_line, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            requests.push(read_request(&mut socket).await);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
        requests
    });

    (format!("http://{addr}/graphql"), handle)
}

pub async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let (endpoint, requests) =
        serve_responses(vec![(status_line.to_string(), body.to_string())]).await;
    let handle = tokio::spawn(async move {
        requests.await.unwrap().pop().unwrap_or_default()
    });
    (endpoint, handle)
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
