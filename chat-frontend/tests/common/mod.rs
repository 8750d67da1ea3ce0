use chat_core::config::Config as CoreConfig;
use chat_frontend::config::{EngineSettings, Settings};
use chat_frontend::startup::Application;
use reqwest::multipart;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub engine: MockServer,
}

impl TestApp {
    pub async fn spawn() -> Self {
        // A wiremock server stands in for the external engine.
        let engine = MockServer::start().await;

        let settings = Settings {
            common: CoreConfig { port: 0 },
            engine: EngineSettings {
                base_url: engine.uri(),
                timeout_secs: 2,
            },
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");
        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint.
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            client,
            engine,
        }
    }

    pub async fn select_file(&self, name: &str, mime: &str, bytes: Vec<u8>) -> reqwest::Response {
        let form = multipart::Form::new().part(
            "file",
            multipart::Part::bytes(bytes)
                .file_name(name.to_string())
                .mime_str(mime)
                .unwrap(),
        );

        self.client
            .post(format!("{}/files", self.address))
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn upload(&self) -> reqwest::Response {
        self.client
            .post(format!("{}/upload", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn submit(&self, query: &str) -> reqwest::Response {
        self.client
            .post(format!("{}/query", self.address))
            .json(&json!({ "query": query }))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn session(&self) -> serde_json::Value {
        self.client
            .get(format!("{}/session", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
            .json()
            .await
            .expect("Failed to parse JSON")
    }

    pub async fn transcript(&self) -> serde_json::Value {
        self.client
            .get(format!("{}/transcript", self.address))
            .send()
            .await
            .expect("Failed to execute request.")
            .json()
            .await
            .expect("Failed to parse JSON")
    }

    /// Select a small PDF and upload it against a mocked `/process` that
    /// answers with the given hash and page count.
    pub async fn establish_session(&self, hash: &str, total_pages: u64) {
        Mock::given(method("POST"))
            .and(path("/process"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "PDF processed successfully and stored in vector database",
                "hash": hash,
                "total_pages": total_pages,
            })))
            .up_to_n_times(1)
            .mount(&self.engine)
            .await;

        let response = self
            .select_file("test.pdf", "application/pdf", b"%PDF-1.4".to_vec())
            .await;
        assert!(response.status().is_success());

        let response = self.upload().await;
        assert!(response.status().is_success());
    }

    /// Mock a successful `/query` response on the engine.
    pub async fn mock_answer(&self, answer: &str, keywords: &str) {
        Mock::given(method("POST"))
            .and(path("/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": "ignored",
                "keywords": keywords,
                "answer": answer,
                "total_results": 3,
            })))
            .mount(&self.engine)
            .await;
    }
}
