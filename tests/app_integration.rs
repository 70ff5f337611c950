use std::fs;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use xrate::core::config::ApiKey;
use xrate::core::currency::Currency;
use xrate::engine::{ExchangeEngine, ExchangeRateEvent, ReceivingAmountPhase, ViewState};
use xrate::providers::CurrencyLayerProvider;

const LIVE_QUOTES: &str = r#"{
    "success": true,
    "timestamp": 1682530563,
    "source": "USD",
    "quotes": {
        "USDKRW": 1337.349843,
        "USDJPY": 133.822978,
        "USDPHP": 55.599497
    }
}"#;

mod test_utils {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(api_key: &str, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/currency_data/live"))
            .and(header("apikey", api_key))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

async fn wait_for(
    engine: &ExchangeEngine,
    done: impl Fn(&ViewState) -> bool,
) -> ViewState {
    let mut updates = engine.subscribe();
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let current = updates.borrow_and_update().clone();
            if done(&current) {
                return current;
            }
            updates.changed().await.expect("engine stopped");
        }
    })
    .await
    .expect("engine did not settle in time")
}

#[test_log::test(tokio::test)]
async fn test_convert_with_mock_server() {
    let mock_server = test_utils::create_mock_server("test-key", LIVE_QUOTES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_path = config_file.path();
    let config_content = format!(
        r#"
        source: live
        providers:
          currency_layer:
            base_url: {}
            api_key: "test-key"
            timeout_secs: 5
    "#,
        mock_server.uri()
    );
    fs::write(config_path, &config_content).expect("Failed to write config file");

    let result = xrate::run_command(
        xrate::AppCommand::Convert {
            to: Currency::JPY,
            amount: Some("250".to_string()),
        },
        Some(config_path.to_str().unwrap()),
        false,
    )
    .await;
    assert!(
        result.is_ok(),
        "Convert command failed with: {:?}",
        result.err()
    );
}

#[test_log::test(tokio::test)]
async fn test_convert_reports_rejected_api_key() {
    let mock_server = test_utils::create_mock_server("right-key", LIVE_QUOTES).await;

    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    let config_content = format!(
        r#"
        providers:
          currency_layer:
            base_url: {}
            api_key: "wrong-key"
            timeout_secs: 5
    "#,
        mock_server.uri()
    );
    fs::write(config_file.path(), &config_content).expect("Failed to write config file");

    let result = xrate::run_command(
        xrate::AppCommand::Convert {
            to: Currency::KRW,
            amount: None,
        },
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;
    let err = result.expect_err("a rejected key should fail the command");
    info!(error = %err, "Convert failed as expected");
    assert!(err.to_string().contains("Transport error"));
}

#[test_log::test(tokio::test)]
async fn test_convert_with_fixture_source() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(
        config_file.path(),
        "source: fixture\nproviders:\n  fixture:\n    delay_ms: 0\n",
    )
    .expect("Failed to write config file");

    let result = xrate::run_command(
        xrate::AppCommand::Convert {
            to: Currency::PHP,
            amount: Some("10".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_preview_flag_needs_no_api_key() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(
        config_file.path(),
        "providers:\n  currency_layer:\n    api_key_env: XRATE_TEST_UNSET_KEY\n",
    )
    .expect("Failed to write config file");

    let result = xrate::run_command(
        xrate::AppCommand::Convert {
            to: Currency::KRW,
            amount: None,
        },
        Some(config_file.path().to_str().unwrap()),
        true,
    )
    .await;
    assert!(result.is_ok(), "Preview failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_missing_api_key_fails_before_fetching() {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(
        config_file.path(),
        "providers:\n  currency_layer:\n    api_key_env: XRATE_TEST_UNSET_KEY\n",
    )
    .expect("Failed to write config file");

    let result = xrate::run_command(
        xrate::AppCommand::Interactive,
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;
    let err = result.expect_err("no key should be configured");
    assert!(err.to_string().contains("$XRATE_TEST_UNSET_KEY"));
}

#[test_log::test(tokio::test)]
async fn test_engine_end_to_end_over_http() {
    let mock_server = test_utils::create_mock_server("test-key", LIVE_QUOTES).await;
    let provider = CurrencyLayerProvider::new(
        &mock_server.uri(),
        ApiKey::new("test-key"),
        Duration::from_secs(5),
    )
    .expect("Failed to build provider");
    let engine = ExchangeEngine::spawn(Arc::new(provider));

    let view = wait_for(&engine, |v| {
        v.receiving_amount_phase == ReceivingAmountPhase::Success
    })
    .await;
    assert_eq!(view.exchange_rate, "1,337.35");
    assert_eq!(view.receiving_amount, "133,734.98 KRW");
    assert!(!view.lookup_time.is_empty());

    engine.send(ExchangeRateEvent::ReceivingCountryChange(Currency::JPY));
    let view = wait_for(&engine, |v| {
        v.receiving_currency == Currency::JPY && !v.exchange_rate.is_empty()
    })
    .await;
    assert_eq!(view.exchange_rate, "133.82");
    assert_eq!(view.receiving_amount, "13,382.30 JPY");

    engine.send(ExchangeRateEvent::SendingAmountChange("10001".to_string()));
    let view = wait_for(&engine, |v| {
        v.receiving_amount_phase == ReceivingAmountPhase::Error
    })
    .await;
    assert_eq!(view.sending_amount, "10001");
    assert_eq!(view.receiving_amount, "13,382.30 JPY");

    engine.shutdown();
}
