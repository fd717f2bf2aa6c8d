//! Optional Prometheus metrics middleware.

use std::io;

use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Request metrics under the `jam` namespace, served at `/metrics`.
///
/// # Errors
///
/// Returns [`io::Error`] when the collectors cannot be registered.
pub(crate) fn make_metrics() -> io::Result<PrometheusMetrics> {
    PrometheusMetricsBuilder::new("jam")
        .endpoint("/metrics")
        .build()
        .map_err(|err| io::Error::other(format!("Prometheus metrics registration failed: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn metrics_endpoint_is_served() {
        let metrics = make_metrics().expect("metrics registry");
        let app = test::init_service(App::new().wrap(metrics)).await;
        let response =
            test::call_service(&app, test::TestRequest::get().uri("/metrics").to_request()).await;
        assert!(response.status().is_success());
    }
}
