// HTTP transport that syncs pages to a Wave-style dashboard server
use crate::application::page_transport::{PageTransport, SyncError};
use crate::domain::page::Page;
use crate::infrastructure::config::ServerSettings;
use crate::infrastructure::payload_mapper::page_to_patch;
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct WaveHttpTransport {
    client: reqwest::Client,
    address: String,
    access_key_id: String,
    access_key_secret: String,
}

impl WaveHttpTransport {
    pub fn new(settings: &ServerSettings) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        Ok(Self {
            client,
            address: settings.address.trim_end_matches('/').to_string(),
            access_key_id: settings.access_key_id.clone(),
            access_key_secret: settings.access_key_secret.clone(),
        })
    }

    fn page_url(&self, route: &str) -> String {
        let path: Vec<String> = route
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!("{}{}", self.address, path.join("/"))
    }
}

#[async_trait]
impl PageTransport for WaveHttpTransport {
    async fn sync(&self, page: &Page) -> Result<(), SyncError> {
        let body = serde_json::to_vec(&page_to_patch(page)).map_err(|source| SyncError::Encode {
            route: page.route.clone(),
            source,
        })?;

        let url = self.page_url(&page.route);
        tracing::debug!("PATCH {} ({} bytes)", url, body.len());

        let response = self
            .client
            .patch(&url)
            .basic_auth(&self.access_key_id, Some(&self.access_key_secret))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Rejected { status, body });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::{Card, CardBox, PlotCard};
    use crate::domain::data_buffer::DataBuffer;
    use crate::domain::plot::{Mark, MarkKind, Visualization};
    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::patch,
        Router,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured {
        bodies: Arc<Mutex<Vec<String>>>,
        auth: Arc<Mutex<Vec<String>>>,
    }

    async fn accept(State(captured): State<Captured>, headers: HeaderMap, body: String) -> StatusCode {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        captured.auth.lock().unwrap().push(auth);
        captured.bodies.lock().unwrap().push(body);
        StatusCode::OK
    }

    async fn reject() -> (StatusCode, &'static str) {
        (StatusCode::UNAUTHORIZED, "bad key")
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn settings(address: String) -> ServerSettings {
        ServerSettings {
            address,
            access_key_id: "id".to_string(),
            access_key_secret: "secret".to_string(),
            timeout_ms: 5_000,
        }
    }

    fn demo_page() -> Page {
        let data = DataBuffer::declare("date price", 50).unwrap();
        let vis = Visualization::new(vec![Mark::new(MarkKind::Line).x("=date").y("=price")]).unwrap();
        let card = PlotCard::new(CardBox::parse("1 1 4 5").unwrap(), "Prices".into(), data, vis).unwrap();

        let mut page = Page::new("/demo").unwrap();
        page.add("example", Card::Plot(card)).unwrap();
        page
    }

    #[test]
    fn test_page_url_encodes_segments() {
        let transport = WaveHttpTransport::new(&settings("http://localhost:10101/".into())).unwrap();
        assert_eq!(transport.page_url("/demo"), "http://localhost:10101/demo");
        assert_eq!(
            transport.page_url("/my page/a b"),
            "http://localhost:10101/my%20page/a%20b"
        );
    }

    #[tokio::test]
    async fn test_sync_patches_page_route() {
        let captured = Captured::default();
        let router = Router::new()
            .route("/demo", patch(accept))
            .with_state(captured.clone());
        let address = serve(router).await;

        let transport = WaveHttpTransport::new(&settings(address)).unwrap();
        transport.sync(&demo_page()).await.unwrap();

        let bodies = captured.bodies.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        let body: serde_json::Value = serde_json::from_str(&bodies[0]).unwrap();
        assert_eq!(body["d"][1]["k"], "example");
        assert_eq!(body["d"][1]["d"]["vis"]["marks"][0]["mark"], "line");

        let auth = captured.auth.lock().unwrap();
        assert!(auth[0].starts_with("Basic "));
    }

    #[tokio::test]
    async fn test_sync_surfaces_rejection() {
        let router = Router::new().route("/demo", patch(reject));
        let address = serve(router).await;

        let transport = WaveHttpTransport::new(&settings(address)).unwrap();
        let err = transport.sync(&demo_page()).await.unwrap_err();

        match err {
            SyncError::Rejected { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_sync_surfaces_unreachable_server() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let transport = WaveHttpTransport::new(&settings(address)).unwrap();
        let err = transport.sync(&demo_page()).await.unwrap_err();
        assert!(matches!(err, SyncError::Transport(_)));
    }
}
