//! Local poem server standing in for the storefront API and the identity
//! provider, so the clients are exercised over a real socket.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use poem::http::StatusCode;
use poem::listener::{Acceptor, Listener, TcpListener};
use poem::web::Data;
use poem::{EndpointExt, Request, Response, Route, Server, handler};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub apikey: Option<String>,
    pub prefer: Option<String>,
    pub body: String,
}

pub struct TestServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

struct Script {
    responses: Vec<(u16, &'static str)>,
    served: AtomicUsize,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[handler]
async fn answer(req: &Request, body: String, script: Data<&Arc<Script>>) -> Response {
    let header = |name: &str| req.header(name).map(str::to_string);
    script.requests.lock().unwrap().push(RecordedRequest {
        method: req.method().to_string(),
        path: req
            .uri()
            .path_and_query()
            .map(|path| path.to_string())
            .unwrap_or_default(),
        authorization: header("authorization"),
        apikey: header("apikey"),
        prefer: header("prefer"),
        body,
    });

    let served = script.served.fetch_add(1, Ordering::SeqCst);
    let (status, body) = script.responses[served.min(script.responses.len() - 1)];
    Response::builder()
        .status(StatusCode::from_u16(status).unwrap())
        .content_type("application/json")
        .body(body)
}

/// Answers the n-th request with the n-th `(status, body)`; the last one repeats.
pub async fn serve(responses: Vec<(u16, &'static str)>) -> TestServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let script = Arc::new(Script {
        responses,
        served: AtomicUsize::new(0),
        requests: requests.clone(),
    });

    let acceptor = TcpListener::bind("127.0.0.1:0")
        .into_acceptor()
        .await
        .unwrap();
    let addr = *acceptor.local_addr()[0].as_socket_addr().unwrap();
    let app = Route::new().at("/*path", answer).data(script);
    tokio::spawn(Server::new_with_acceptor(acceptor).run(app));

    TestServer {
        base_url: format!("http://{}", addr),
        requests,
    }
}
