//! ログ初期化
//!
//! 既定は warn、`--verbose` で debug。`RUST_LOG` が指定されていればそちらを優先する。

use log::LevelFilter;

pub fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
