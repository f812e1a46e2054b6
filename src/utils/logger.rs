use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 日誌輸出格式：互動模式用精簡文字，收集日誌時用 JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// 未設定 RUST_LOG 時的預設過濾規則
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "student_roster=debug,info"
    } else {
        "student_roster=info"
    }
}

// 日誌一律寫到 stderr，選單輸出留在 stdout
pub fn init_logger(format: LogFormat, verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_enables_debug_for_roster_only() {
        assert_eq!(default_directive(false), "student_roster=info");
        assert_eq!(default_directive(true), "student_roster=debug,info");
        assert!(default_directive(true).parse::<EnvFilter>().is_ok());
    }
}
