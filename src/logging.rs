use tracing_subscriber::EnvFilter;

/// 未设置RUST_LOG时使用的过滤规则
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "finreport_rs=debug,finreport=debug,info"
    } else {
        "info"
    }
}

/// 安装stderr日志订阅者，RUST_LOG优先于verbose
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    // 重复初始化（如测试中）时忽略错误
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(false), "info");
        assert!(default_filter(true).contains("finreport_rs=debug"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(false);
        init(true);
    }
}
