//! Axum router assembly.

use axum::Router;
use axum::middleware;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use wedge_app::ports::Platform;

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Unmatched paths and unregistered methods on known paths both answer
/// `404` with a JSON body. Layers, innermost first: panic capture, the
/// access log (so it sees the final status of every request, panics
/// included), and a [`TraceLayer`] logging request spans at `DEBUG`.
/// Its failure hook is off: handlers already log each 5xx once at `ERROR`.
pub fn build<P: Platform>(state: AppState<P>) -> Router {
    Router::new()
        .merge(crate::api::routes::<P>())
        .fallback(crate::error::not_found)
        .method_not_allowed_fallback(crate::error::not_found)
        .layer(CatchPanicLayer::custom(crate::error::panic_response))
        .layer(middleware::from_fn(crate::access_log::record))
        .layer(TraceLayer::new_for_http().on_failure(()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use wedge_app::catalog::{Catalog, ENDPOINTS};
    use wedge_app::ports::{
        BmcReader, FruReader, GpioReader, ModbusReader, PeerPresence, PsuUpdater, SensorReader,
        ServerControl, SlotIdReader, Usb2I2cReset,
    };
    use wedge_app::services::system_service::SystemService;
    use wedge_domain::capability::Capability;
    use wedge_domain::error::{HardwareError, NotPresentError, WedgeError};
    use wedge_domain::reply::Reply;

    /// Healthy platforms answer every read; broken ones fail in every way a
    /// provider can.
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Health {
        Healthy,
        Broken,
    }

    struct StubPlatform {
        health: Health,
        server_commands: Mutex<Vec<Value>>,
        job_specs: Mutex<Vec<Value>>,
    }

    impl StubPlatform {
        fn new(health: Health) -> Self {
            Self {
                health,
                server_commands: Mutex::new(Vec::new()),
                job_specs: Mutex::new(Vec::new()),
            }
        }

        fn leaf(&self, capability: Capability) -> Result<Reply, WedgeError> {
            Ok(json!({
                "Information": { "name": capability.as_str() },
                "Actions": [],
                "Resources": [],
            })
            .into())
        }
    }

    impl FruReader for StubPlatform {
        async fn read_fruid(&self) -> Result<Reply, WedgeError> {
            self.leaf(Capability::Fruid)
        }
    }

    impl BmcReader for StubPlatform {
        async fn read_bmc(&self) -> Result<Reply, WedgeError> {
            self.leaf(Capability::Bmc)
        }
    }

    impl ServerControl for StubPlatform {
        async fn server_status(&self) -> Result<Reply, WedgeError> {
            Ok(json!({
                "Information": { "status": "on" },
                "Actions": ["power-on", "power-off", "power-reset"],
                "Resources": [],
            })
            .into())
        }

        async fn server_action(&self, command: Value) -> Result<Reply, WedgeError> {
            self.server_commands.lock().unwrap().push(command.clone());
            Ok(json!({ "result": "success", "requested": command }).into())
        }
    }

    impl SensorReader for StubPlatform {
        async fn read_sensors(&self) -> Result<Reply, WedgeError> {
            match self.health {
                Health::Healthy => self.leaf(Capability::Sensors),
                Health::Broken => Err(HardwareError::with_source(
                    Capability::Sensors,
                    "cannot read tmp75-i2c-3-48",
                    io::Error::new(io::ErrorKind::TimedOut, "i2c timeout"),
                )
                .into()),
            }
        }
    }

    impl GpioReader for StubPlatform {
        async fn read_gpios(&self) -> Result<Reply, WedgeError> {
            self.leaf(Capability::Gpios)
        }
    }

    impl PeerPresence for StubPlatform {
        async fn read_fc_present(&self) -> Result<Reply, WedgeError> {
            match self.health {
                Health::Healthy => self.leaf(Capability::FcPresent),
                Health::Broken => Err(NotPresentError {
                    capability: Capability::FcPresent,
                }
                .into()),
            }
        }
    }

    impl ModbusReader for StubPlatform {
        async fn read_modbus_registers(&self) -> Result<Reply, WedgeError> {
            match self.health {
                Health::Healthy => self.leaf(Capability::ModbusRegisters),
                Health::Broken => Ok(Reply::raw("application/octet-stream", vec![0x01, 0x03])),
            }
        }
    }

    impl PsuUpdater for StubPlatform {
        async fn list_jobs(&self) -> Result<Reply, WedgeError> {
            self.leaf(Capability::PsuUpdate)
        }

        async fn begin_job(&self, spec: Value) -> Result<Reply, WedgeError> {
            self.job_specs.lock().unwrap().push(spec);
            Ok(json!({ "job_id": "job-1" }).into())
        }
    }

    impl SlotIdReader for StubPlatform {
        async fn read_slot_id(&self) -> Result<Reply, WedgeError> {
            self.leaf(Capability::SlotId)
        }
    }

    impl Usb2I2cReset for StubPlatform {
        async fn reset_usb2i2c(&self) -> Result<Reply, WedgeError> {
            assert!(self.health == Health::Healthy, "usb2i2c bridge wedged");
            Ok(json!({ "result": "success" }).into())
        }
    }

    fn service(health: Health) -> Arc<SystemService<StubPlatform>> {
        Arc::new(SystemService::new(
            Catalog::standard().unwrap(),
            StubPlatform::new(health),
        ))
    }

    fn app(service: &Arc<SystemService<StubPlatform>>) -> Router {
        build(AppState::from_arc(Arc::clone(service)))
    }

    async fn send(router: Router, method: Method, uri: &str, body: &'static str) -> Response {
        router
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(router: Router, uri: &str) -> Response {
        send(router, Method::GET, uri, "").await
    }

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn should_serve_every_endpoint() {
        let service = service(Health::Healthy);
        for path in ENDPOINTS {
            let response = get(app(&service), path).await;
            assert_eq!(response.status(), StatusCode::OK, "GET {path}");
            assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
            let body = json_body(response).await;
            if path != "/api/sys/usb2i2c_reset" {
                for key in ["Information", "Actions", "Resources"] {
                    assert!(body.get(key).is_some(), "GET {path} lacks {key}");
                }
            }
        }
    }

    #[tokio::test]
    async fn should_describe_api_root() {
        let response = get(app(&service(Health::Healthy)), "/api").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({
                "Information": { "Description": "Wedge RESTful API Entry" },
                "Actions": [],
                "Resources": ["sys"],
            })
        );
    }

    #[tokio::test]
    async fn should_resolve_every_listed_child() {
        let service = service(Health::Healthy);
        for parent in ["/api", "/api/sys", "/api/sys/mb"] {
            let body = json_body(get(app(&service), parent).await).await;
            for child in body["Resources"].as_array().unwrap() {
                let path = format!("{parent}/{}", child.as_str().unwrap());
                let response = get(app(&service), &path).await;
                assert_eq!(response.status(), StatusCode::OK, "GET {path}");
            }
        }
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_path_with_any_method() {
        let service = service(Health::Healthy);
        for method in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
            let response = send(app(&service), method.clone(), "/api/sys/doesnotexist", "").await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{method}");
            assert_eq!(json_body(response).await, json!({ "error": "not found" }));
        }
    }

    #[tokio::test]
    async fn should_return_not_found_for_unregistered_method() {
        let service = service(Health::Healthy);
        let response = send(app(&service), Method::DELETE, "/api/sys/server", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(app(&service), Method::POST, "/api/sys/bmc", "{}").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn should_read_server_status_without_running_action() {
        let service = service(Health::Healthy);
        let response = get(app(&service), "/api/sys/server").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["Information"]["status"], "on");
        assert!(service.platform().server_commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_run_server_action_once_and_return_result_verbatim() {
        let service = service(Health::Healthy);
        let response = send(
            app(&service),
            Method::POST,
            "/api/sys/server",
            r#"{"action":"reboot"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            json_body(response).await,
            json!({ "result": "success", "requested": { "action": "reboot" } })
        );
        assert_eq!(
            *service.platform().server_commands.lock().unwrap(),
            vec![json!({ "action": "reboot" })]
        );
    }

    #[tokio::test]
    async fn should_reject_malformed_job_spec_without_submitting() {
        let service = service(Health::Healthy);
        let response = send(
            app(&service),
            Method::POST,
            "/api/sys/psu_update",
            "file=/tmp/psu.hex",
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(json_body(response).await["error"].is_string());
        assert!(service.platform().job_specs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_reject_non_object_command() {
        let service = service(Health::Healthy);
        let response = send(app(&service), Method::POST, "/api/sys/server", "[1, 2]").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(service.platform().server_commands.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_submit_job_spec_unmodified() {
        let service = service(Health::Healthy);
        let response = send(
            app(&service),
            Method::POST,
            "/api/sys/psu_update",
            r#"{"file":"/tmp/psu.hex","address":"0xa4"}"#,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["job_id"], "job-1");
        assert_eq!(
            *service.platform().job_specs.lock().unwrap(),
            vec![json!({ "file": "/tmp/psu.hex", "address": "0xa4" })]
        );
    }

    #[tokio::test]
    async fn should_surface_hardware_error_as_server_error() {
        let response = get(app(&service(Health::Broken)), "/api/sys/sensors").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "sensors: cannot read tmp75-i2c-3-48" })
        );
    }

    #[tokio::test]
    async fn should_surface_missing_hardware_as_unavailable() {
        let response = get(app(&service(Health::Broken)), "/api/sys/fc_present").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn should_pass_raw_reply_through() {
        let response = get(app(&service(Health::Broken)), "/api/sys/modbus_registers").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/octet-stream");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], &[0x01, 0x03]);
    }

    #[tokio::test]
    async fn should_turn_panicking_provider_into_json_error() {
        let response = get(app(&service(Health::Broken)), "/api/sys/usb2i2c_reset").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "internal server error" })
        );
    }

    /// Collects everything the subscriber writes.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    #[tokio::test]
    async fn should_log_one_access_line_per_concurrent_request() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let service = service(Health::Healthy);
        let (bmc, sensors, missing) = tokio::join!(
            get(app(&service), "/api/sys/bmc"),
            get(app(&service), "/api/sys/sensors"),
            get(app(&service), "/api/sys/doesnotexist"),
        );
        assert_eq!(bmc.status(), StatusCode::OK);
        assert_eq!(sensors.status(), StatusCode::OK);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let access: Vec<_> = captured
            .lines()
            .into_iter()
            .filter(|line| line.contains(" - - ["))
            .collect();
        assert_eq!(access.len(), 3, "{access:#?}");
        for (request, status) in [
            ("\"GET /api/sys/bmc HTTP/1.1\"", " 200 "),
            ("\"GET /api/sys/sensors HTTP/1.1\"", " 200 "),
            ("\"GET /api/sys/doesnotexist HTTP/1.1\"", " 404 "),
        ] {
            let line = access
                .iter()
                .find(|line| line.contains(request))
                .unwrap_or_else(|| panic!("no access line for {request}"));
            assert!(line.contains(status), "{line}");
            assert!(line.trim_start().starts_with("INFO - - - ["), "{line}");
        }
    }

    #[tokio::test]
    async fn should_log_server_error_once() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let response = get(app(&service(Health::Broken)), "/api/sys/sensors").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let errors: Vec<_> = captured
            .lines()
            .into_iter()
            .filter(|line| line.trim_start().starts_with("ERROR"))
            .collect();
        assert_eq!(errors.len(), 1, "{errors:#?}");
        assert!(errors[0].contains("hardware error"), "{}", errors[0]);
    }
}
