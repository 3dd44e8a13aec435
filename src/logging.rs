use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// 診断ログを初期化（`RUST_LOG` が優先）
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let env_filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    // 進捗表示は stdout なのでログは stderr に出す
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
