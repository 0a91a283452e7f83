//! Integration tests for the degradation layer
//!
//! Each test drives the complete route tree: health routes, metrics, the
//! request pipeline and a recording business layer.

#[cfg(test)]
mod tests {
    use crate::domain::fallback::FallbackRouteTable;
    use crate::domain::health::ServiceStatus;
    use crate::tests::common::TestHarness;
    use crate::tests::config::{init, rate_limited_test_config, test_config};
    use crate::tests::utils::{assert_degraded_error, json_body, wait_for};
    use crate::tests::TestResult;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;
    use warp::http::StatusCode;
    use warp::Filter;

    const BUSINESS_STATUS: u16 = 299;
    const WRITE_METHODS: [&str; 4] = ["POST", "PUT", "PATCH", "DELETE"];

    #[tokio::test]
    async fn test_degraded_until_first_successful_probe() {
        init();
        let harness = TestHarness::new(test_config());
        let routes = harness.routes();

        let res = warp::test::request().path("/health/ready").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);

        harness.monitor.run_cycle().await;

        let res = warp::test::request().path("/health/ready").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body = json_body(res.body());
        assert_eq!(body["status"], "ready");
        assert_eq!(body["primary_datastore"], "ok");
        assert_eq!(body["cache"], "ok");
    }

    #[tokio::test]
    async fn test_healthy_requests_reach_business_unmodified() {
        init();
        let harness = TestHarness::with_probes(test_config(), true, true).await;
        let routes = harness.routes();

        for method in ["GET", "POST", "PUT", "PATCH", "DELETE"] {
            let res = warp::test::request()
                .method(method)
                .path("/api/brands/7")
                .body(r#"{"name":"Acme"}"#)
                .reply(&routes)
                .await;
            assert_eq!(res.status().as_u16(), BUSINESS_STATUS, "{} was intercepted", method);
        }

        let requests = harness.business.requests();
        assert_eq!(requests.len(), 5);
        assert!(requests.iter().all(|r| r.path == "/api/brands/7"));
        assert!(requests.iter().all(|r| r.body.as_ref() == br#"{"name":"Acme"}"#));
    }

    #[tokio::test]
    async fn test_every_fallback_route_served_while_degraded() {
        init();
        let harness = TestHarness::with_probes(test_config(), false, true).await;
        let routes = harness.routes();

        for entry in FallbackRouteTable::builtin().entries() {
            let mut path = entry.path_prefix.clone();
            if path.ends_with('/') {
                path.push_str("42");
            }
            if let Some(suffix) = entry.path_suffix.as_deref() {
                path.push_str(suffix);
            }

            let res = warp::test::request().method("GET").path(&path).reply(&routes).await;
            assert_eq!(res.status(), StatusCode::OK, "{} not served", path);

            let body = json_body(res.body());
            assert_eq!(body.is_array(), entry.payload.is_array(), "shape mismatch for {}", path);
            if body.is_object() {
                assert_eq!(body["degraded"], true, "missing marker on {}", path);
            }
        }

        assert_eq!(harness.business.count(), 0);
    }

    #[tokio::test]
    async fn test_writes_blocked_while_degraded() {
        init();
        let harness = TestHarness::with_probes(test_config(), false, true).await;
        let routes = harness.routes();

        for method in WRITE_METHODS {
            let res = warp::test::request()
                .method(method)
                .path("/api/content/12")
                .body("{}")
                .reply(&routes)
                .await;
            assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
            assert_degraded_error(&json_body(res.body()));
        }

        assert_eq!(harness.business.count(), 0);
        assert_eq!(harness.state.monitoring.interception_count("blocked"), 4);
    }

    #[tokio::test]
    async fn test_dot_segments_cannot_escape_into_protected_writes() {
        init();
        let harness = TestHarness::with_probes(test_config(), false, true).await;
        let routes = harness.routes();

        for path in [
            "/api/chat/../brands/7",
            "/health/../api/brands/7",
            "/api/upload/%2e%2e/brands/7",
            "/api/onboarding/.%2E/content/3",
        ] {
            let res = warp::test::request()
                .method("POST")
                .path(path)
                .body("{}")
                .reply(&routes)
                .await;
            assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE, "{} slipped through", path);
            assert_degraded_error(&json_body(res.body()));
        }

        // Reads resolve onto fallback routes the same way
        let res = warp::test::request().path("/api/chat/../brands").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(json_body(res.body()).is_array());

        assert_eq!(harness.business.count(), 0);
    }

    #[tokio::test]
    async fn test_passthrough_forwarded_regardless_of_method() {
        init();
        let harness = TestHarness::with_probes(test_config(), false, false).await;
        let routes = harness.routes();

        let cases = [
            ("POST", "/api/chat/messages"),
            ("GET", "/api/chat/history"),
            ("PUT", "/api/upload/avatar"),
            ("POST", "/api/uploads"),
            ("PATCH", "/api/onboarding/step/2"),
            ("DELETE", "/api/onboarding"),
        ];
        for (method, path) in cases {
            let res = warp::test::request()
                .method(method)
                .path(path)
                .body("raw body")
                .reply(&routes)
                .await;
            assert_eq!(
                res.status().as_u16(),
                BUSINESS_STATUS,
                "{} {} was intercepted",
                method,
                path
            );
        }

        let requests = harness.business.requests();
        assert_eq!(requests.len(), cases.len());
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "/api/chat/messages");
        assert_eq!(requests[0].body.as_ref(), b"raw body");
    }

    #[tokio::test]
    async fn test_unmatched_reads_and_unprotected_writes_forwarded() {
        init();
        let harness = TestHarness::with_probes(test_config(), false, true).await;
        let routes = harness.routes();

        let res = warp::test::request().path("/api/invoices").reply(&routes).await;
        assert_eq!(res.status().as_u16(), BUSINESS_STATUS);

        let res = warp::test::request()
            .method("POST")
            .path("/webhooks/billing")
            .reply(&routes)
            .await;
        assert_eq!(res.status().as_u16(), BUSINESS_STATUS);

        assert_eq!(harness.business.count(), 2);
    }

    #[tokio::test]
    async fn test_cache_outage_alone_does_not_degrade() {
        init();
        let harness = TestHarness::with_probes(test_config(), true, false).await;
        let routes = harness.routes();

        assert!(!harness.state.controller.is_degraded());
        assert_eq!(harness.state.registry.get("cache").unwrap().status, ServiceStatus::Unavailable);

        let res = warp::test::request().path("/health/ready").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res.body())["cache"], "unavailable");

        let res = warp::test::request().method("POST").path("/api/brands").reply(&routes).await;
        assert_eq!(res.status().as_u16(), BUSINESS_STATUS);
    }

    #[tokio::test]
    async fn test_datastore_outage_degrades_despite_healthy_cache() {
        init();
        let harness = TestHarness::new(test_config());
        harness.state.registry.register("primary_datastore", ServiceStatus::Unavailable);
        harness.state.registry.register("cache", ServiceStatus::Healthy);

        assert!(harness.state.controller.is_degraded());

        let routes = harness.routes();
        let res = warp::test::request().path("/health/status").reply(&routes).await;
        assert_eq!(json_body(res.body())["mode"], "degraded");
    }

    #[tokio::test]
    async fn test_status_after_flap_reports_full_mode() {
        init();
        let harness = TestHarness::new(test_config());
        let registry = &harness.state.registry;

        registry.update("primary_datastore", ServiceStatus::Healthy);
        registry.update("primary_datastore", ServiceStatus::Unavailable);
        let before_last_update = chrono::Utc::now();
        registry.update("primary_datastore", ServiceStatus::Healthy);

        let routes = harness.routes();
        let res = warp::test::request().path("/health/status").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::OK);

        let body = json_body(res.body());
        assert_eq!(body["mode"], "full");
        assert_eq!(body["services"]["primary_datastore"]["status"], "healthy");

        let datastore = &body["services"]["primary_datastore"];
        let last_check: chrono::DateTime<chrono::Utc> = datastore["last_check"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(last_check >= before_last_update);
    }

    #[tokio::test]
    async fn test_recovery_through_monitor_cycle() {
        init();
        let harness = TestHarness::with_probes(test_config(), false, true).await;
        let routes = harness.routes();

        let res = warp::test::request().method("POST").path("/api/brands").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(harness.state.monitoring.is_degraded());

        harness.datastore.set_healthy(true);
        harness.monitor.run_cycle().await;

        let res = warp::test::request().method("POST").path("/api/brands").reply(&routes).await;
        assert_eq!(res.status().as_u16(), BUSINESS_STATUS);
        assert!(!harness.state.monitoring.is_degraded());

        let res = warp::test::request().path("/health/status").reply(&routes).await;
        assert_eq!(json_body(res.body())["mode"], "full");
    }

    #[tokio::test]
    async fn test_health_and_metrics_never_intercepted() {
        init();
        let harness = TestHarness::with_probes(rate_limited_test_config(1), false, false).await;
        let routes = harness.routes();

        // Exhaust the limiter through the pipeline
        let res = warp::test::request().path("/api/invoices").reply(&routes).await;
        assert_eq!(res.status().as_u16(), BUSINESS_STATUS);
        let res = warp::test::request().path("/api/invoices").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::TOO_MANY_REQUESTS);

        let res = warp::test::request().path("/health/live").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(json_body(res.body())["status"], "alive");

        let res = warp::test::request().path("/metrics").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::OK);
        let text = String::from_utf8(res.body().to_vec()).unwrap();
        assert!(text.contains("resilience_degraded 1"));
    }

    #[tokio::test]
    async fn test_pipeline_order_follows_config() {
        init();
        // Degradation first: blocked writes do not consume rate limit tokens
        let mut config = rate_limited_test_config(1);
        config.pipeline.stages = vec!["degradation".to_string(), "rate_limit".to_string()];
        let harness = TestHarness::with_probes(config, false, true).await;
        let routes = harness.routes();

        for _ in 0..3 {
            let res = warp::test::request().method("POST").path("/api/brands").reply(&routes).await;
            assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
        }

        let res = warp::test::request().path("/api/invoices").reply(&routes).await;
        assert_eq!(res.status().as_u16(), BUSINESS_STATUS);
        assert_eq!(harness.state.pipeline.stage_names(), vec!["degradation", "rate_limit"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_monitor_updates_routes() -> TestResult<()> {
        init();
        let harness = TestHarness::with_probes(test_config(), false, true).await;
        let shutdown = CancellationToken::new();
        let handle = harness.monitor.clone().spawn(shutdown.clone());

        harness.datastore.set_healthy(true);
        let controller = harness.state.controller.clone();
        let recovered = wait_for(
            move || {
                let controller = controller.clone();
                async move { !controller.is_degraded() }
            },
            Duration::from_secs(30),
        )
        .await;
        assert!(recovered, "monitor never picked up the recovered datastore");

        let routes = harness.routes();
        let res = warp::test::request().path("/health/ready").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(harness.datastore.calls() >= 2);

        shutdown.cancel();
        handle.await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_not_found() {
        init();
        let harness = TestHarness::with_probes(test_config(), true, true).await;
        let routes = crate::infrastructure::http::routes::RouteBuilder::build_routes(
            &harness.state,
            warp::path("only").and(warp::path::end()).map(|| "only"),
        );

        let res = warp::test::request().path("/nothing/here").reply(&routes).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(res.body())["detail"], "Not Found");
    }
}
