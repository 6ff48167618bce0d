use env_logger::{Builder, Env};

/// 初始化日誌；預設只顯示警告以上，避免干擾互動畫面，可用 `RUST_LOG` 調整
pub fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
