//! Transport to the remote notes collection. The store only talks to the
//! [`NoteBackend`] trait; [`HttpBackend`] is the real implementation against
//! the `{base}` / `{base}/{id}` REST endpoint.

use std::{collections::BTreeMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use ureq::{Agent, Body, RequestBuilder, http::Response};

use crate::{error::BackendError, types::note::{Note, NoteDraft, NoteId}};

#[cfg(test)]
pub(crate) mod scripted;

#[async_trait]
pub trait NoteBackend: Send + Sync {
	/// GET `{base}`, in server order.
	async fn list(&self) -> Result<Vec<Note>, BackendError>;

	/// POST `{base}`; the returned note carries the assigned id.
	async fn create(&self, draft: &NoteDraft) -> Result<Note, BackendError>;

	/// PUT `{base}/{id}`. Servers may answer with the stored note or nothing.
	async fn update(&self, note: &Note) -> Result<Option<Note>, BackendError>;

	/// DELETE `{base}/{id}`.
	async fn delete(&self, id: &NoteId) -> Result<(), BackendError>;
}

#[derive(Clone)]
pub struct HttpBackend {
	base_url: Arc<str>,
	agent:    Agent,
	headers:  Arc<[(String, String)]>,
}

impl HttpBackend {
	pub fn new(
		base_url: &str,
		timeout: Option<Duration>,
		headers: &BTreeMap<String, String>,
	) -> Self {
		debug!("Building HTTP backend for {} (timeout: {:?})", base_url, timeout);

		let agent: Agent = Agent::config_builder().timeout_global(timeout).build().into();
		let headers = headers.iter().map(|(k, v)| (k.clone(), v.clone())).collect::<Vec<_>>();

		Self { base_url: base_url.trim_end_matches('/').into(), agent, headers: headers.into() }
	}

	pub fn base_url(&self) -> &str { &self.base_url }

	fn note_url(&self, id: &NoteId) -> String { format!("{}/{}", self.base_url, id) }

	fn with_headers<B>(&self, mut request: RequestBuilder<B>) -> RequestBuilder<B> {
		for (name, value) in self.headers.iter() {
			request = request.header(name.as_str(), value.as_str());
		}
		request
	}

	/// Runs a blocking request on the blocking pool so the caller's task
	/// keeps its thread.
	async fn run<T, F>(&self, call: F) -> Result<T, BackendError>
	where
		T: Send + 'static,
		F: FnOnce(HttpBackend) -> Result<T, BackendError> + Send + 'static,
	{
		let backend = self.clone();
		tokio::task::spawn_blocking(move || call(backend)).await?
	}
}

fn transport_error(url: &str, error: ureq::Error) -> BackendError {
	match error {
		ureq::Error::StatusCode(status) => {
			warn!("{} answered with status {}", url, status);
			BackendError::Status { url: url.to_string(), status }
		}
		other => {
			warn!("Request to {} failed: {}", url, other);
			BackendError::Http { url: url.to_string(), source: Box::new(other) }
		}
	}
}

fn read_text(url: &str, response: &mut Response<Body>) -> Result<String, BackendError> {
	response.body_mut().read_to_string().map_err(|e| transport_error(url, e))
}

fn read_json<T: DeserializeOwned>(url: &str, response: &mut Response<Body>) -> Result<T, BackendError> {
	let text = read_text(url, response)?;
	Ok(serde_json::from_str(&text)?)
}

#[async_trait]
impl NoteBackend for HttpBackend {
	#[instrument(skip_all)]
	async fn list(&self) -> Result<Vec<Note>, BackendError> {
		self.run(|backend| {
			let url = backend.base_url.to_string();
			let mut response = backend
				.with_headers(backend.agent.get(url.as_str()))
				.call()
				.map_err(|e| transport_error(&url, e))?;

			let notes: Vec<Note> = read_json(&url, &mut response)?;
			debug!("Fetched {} notes", notes.len());
			Ok(notes)
		})
		.await
	}

	#[instrument(skip_all)]
	async fn create(&self, draft: &NoteDraft) -> Result<Note, BackendError> {
		let draft = draft.clone();
		self.run(move |backend| {
			let url = backend.base_url.to_string();
			let mut response = backend
				.with_headers(backend.agent.post(url.as_str()))
				.send_json(&draft)
				.map_err(|e| transport_error(&url, e))?;

			read_json(&url, &mut response)
		})
		.await
	}

	#[instrument(skip(self, note), fields(id = %note.id))]
	async fn update(&self, note: &Note) -> Result<Option<Note>, BackendError> {
		let note = note.clone();
		self.run(move |backend| {
			let url = backend.note_url(&note.id);
			let mut response = backend
				.with_headers(backend.agent.put(url.as_str()))
				.send_json(&note)
				.map_err(|e| transport_error(&url, e))?;

			let text = read_text(&url, &mut response)?;
			if text.trim().is_empty() {
				return Ok(None);
			}
			Ok(Some(serde_json::from_str(&text)?))
		})
		.await
	}

	#[instrument(skip(self))]
	async fn delete(&self, id: &NoteId) -> Result<(), BackendError> {
		let id = id.clone();
		self.run(move |backend| {
			let url = backend.note_url(&id);
			backend
				.with_headers(backend.agent.delete(url.as_str()))
				.call()
				.map_err(|e| transport_error(&url, e))?;
			Ok(())
		})
		.await
	}
}

#[cfg(test)]
mod tests {
	use std::{io::{BufRead, BufReader, Read, Write}, net::{TcpListener, TcpStream}, thread};

	use super::*;

	#[derive(Debug)]
	struct Received {
		method:  String,
		path:    String,
		headers: BTreeMap<String, String>,
		body:    String,
	}

	/// Answers one connection per canned reply, in order, and hands back what
	/// each request looked like.
	fn serve(replies: Vec<(u16, &'static str)>) -> (String, thread::JoinHandle<Vec<Received>>) {
		let listener = TcpListener::bind("127.0.0.1:0").unwrap();
		let addr = listener.local_addr().unwrap();

		let handle = thread::spawn(move || {
			replies
				.into_iter()
				.map(|(status, body)| {
					let (stream, _) = listener.accept().unwrap();
					answer(stream, status, body)
				})
				.collect()
		});

		(format!("http://{}/apps/quicknotes/notes", addr), handle)
	}

	fn answer(stream: TcpStream, status: u16, body: &str) -> Received {
		let mut reader = BufReader::new(stream);

		let mut request_line = String::new();
		reader.read_line(&mut request_line).unwrap();
		let mut parts = request_line.split_whitespace();
		let method = parts.next().unwrap_or_default().to_string();
		let path = parts.next().unwrap_or_default().to_string();

		let mut headers = BTreeMap::new();
		loop {
			let mut line = String::new();
			reader.read_line(&mut line).unwrap();
			let line = line.trim_end();
			if line.is_empty() {
				break;
			}
			if let Some((name, value)) = line.split_once(':') {
				headers.insert(name.trim().to_ascii_lowercase(), value.trim().to_string());
			}
		}

		let length = headers.get("content-length").and_then(|v| v.parse().ok()).unwrap_or(0);
		let mut payload = vec![0; length];
		reader.read_exact(&mut payload).unwrap();

		let reason = if status < 400 { "OK" } else { "Not Found" };
		let mut stream = reader.into_inner();
		write!(
			stream,
			"HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
			status,
			reason,
			body.len(),
			body
		)
		.unwrap();
		stream.flush().unwrap();

		Received { method, path, headers, body: String::from_utf8(payload).unwrap() }
	}

	/// Backend that talks straight to the local listener, whatever proxy the
	/// environment names.
	fn local_backend(base_url: &str, headers: &BTreeMap<String, String>) -> HttpBackend {
		let mut backend = HttpBackend::new(base_url, None, headers);
		backend.agent = Agent::config_builder().proxy(None).build().into();
		backend
	}

	#[tokio::test]
	async fn requests_follow_the_collection_endpoint() {
		let (base_url, server) = serve(vec![
			(200, r##"[{"id": 1, "title": "A", "content": "", "color": "#fff"}, {"id": "b", "title": "B", "content": "", "color": "#000"}]"##),
			(200, r##"{"id": 7, "title": "New note", "content": "", "color": "#F7EB96"}"##),
			(200, ""),
			(200, ""),
		]);
		let headers = BTreeMap::from([("requesttoken".to_string(), "abc123".to_string())]);
		let backend = local_backend(&base_url, &headers);

		let listed = backend.list().await.unwrap();
		assert_eq!(listed.len(), 2);
		assert_eq!(listed[1].id, NoteId::Text("b".into()));

		let created = backend.create(&NoteDraft::new("New note", "", "#F7EB96")).await.unwrap();
		assert_eq!(created.id, NoteId::Number(7));

		let edited = Note {
			id:      NoteId::Number(5),
			title:   "X".into(),
			content: "<b>y</b>".into(),
			color:   "#000".into(),
			active:  true,
		};
		assert_eq!(backend.update(&edited).await.unwrap(), None);

		backend.delete(&NoteId::Number(5)).await.unwrap();

		let received = server.join().unwrap();
		let calls: Vec<(&str, &str)> =
			received.iter().map(|r| (r.method.as_str(), r.path.as_str())).collect();
		assert_eq!(calls, vec![
			("GET", "/apps/quicknotes/notes"),
			("POST", "/apps/quicknotes/notes"),
			("PUT", "/apps/quicknotes/notes/5"),
			("DELETE", "/apps/quicknotes/notes/5"),
		]);

		for request in &received {
			assert_eq!(request.headers.get("requesttoken").map(String::as_str), Some("abc123"));
		}

		let posted: serde_json::Value = serde_json::from_str(&received[1].body).unwrap();
		assert_eq!(posted, serde_json::json!({"title": "New note", "content": "", "color": "#F7EB96"}));
		assert!(received[1].headers["content-type"].starts_with("application/json"));

		let put: serde_json::Value = serde_json::from_str(&received[2].body).unwrap();
		assert_eq!(put, serde_json::json!({"id": 5, "title": "X", "content": "<b>y</b>", "color": "#000"}));
		assert!(received[2].headers["content-type"].starts_with("application/json"));
	}

	#[tokio::test]
	async fn update_echo_is_returned_and_errors_keep_their_status() {
		let (base_url, server) = serve(vec![
			(200, r##"{"id": 5, "title": "X", "content": "", "color": "#000"}"##),
			(404, r#"{"message": "Not found"}"#),
		]);
		let backend = local_backend(&base_url, &BTreeMap::new());
		let edited = Note {
			id:      NoteId::Number(5),
			title:   "X".into(),
			content: String::new(),
			color:   "#000".into(),
			active:  false,
		};

		let echoed = backend.update(&edited).await.unwrap();
		assert_eq!(echoed, Some(edited));

		let missing = backend.delete(&NoteId::Number(9)).await;
		assert!(matches!(missing, Err(BackendError::Status { status: 404, .. })));

		server.join().unwrap();
	}

	#[test]
	fn note_urls_join_on_a_single_slash() {
		let backend =
			HttpBackend::new("http://localhost/apps/quicknotes/notes/", None, &BTreeMap::new());

		assert_eq!(backend.base_url(), "http://localhost/apps/quicknotes/notes");
		assert_eq!(
			backend.note_url(&NoteId::Number(5)),
			"http://localhost/apps/quicknotes/notes/5"
		);
	}

	#[test]
	fn status_codes_keep_their_own_variant() {
		let error = transport_error("http://x/notes", ureq::Error::StatusCode(404));
		assert!(matches!(error, BackendError::Status { status: 404, .. }));
	}
}
