#[macro_export]
macro_rules! log_err {
    // Usage: log_err!(state.store, ("list_banners", e.to_string()));
    ($store:expr, $params:expr) => {{
        let store: ::std::sync::Arc<dyn $crate::db::DocumentStore> =
            ::std::sync::Arc::clone(&$store);
        let location = format!("{}:{}", file!(), line!());

        let params_json = ::serde_json::to_value($params)
            .unwrap_or(::serde_json::Value::Null);

        ::tracing::error!(%location, parameters = %params_json, "request failed");

        ::tokio::spawn(async move {
            let _ = $crate::db::record_error(
                store.as_ref(),
                &location,
                params_json,
            )
            .await;
        });
    }};
}
