use cfg_if::cfg_if;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};
use tracing_subscriber::util::SubscriberInitExt;

/// Where log output goes and how much of it
#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    /// `EnvFilter` directives
    pub filter: String,
    /// Daily-rolled log file (native only)
    pub file: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { filter: "info".to_string(), file: "logs/roomfolio.log".to_string() }
    }
}

impl LogSettings {
    /// `ROOMFOLIO_LOG` wins over `RUST_LOG`; `ROOMFOLIO_LOG_FILE` moves the file
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self::resolve(var("ROOMFOLIO_LOG").or_else(|| var("RUST_LOG")), var("ROOMFOLIO_LOG_FILE"))
    }

    fn resolve(filter: Option<String>, file: Option<String>) -> Self {
        let defaults = Self::default();
        Self { filter: filter.unwrap_or(defaults.filter), file: file.unwrap_or(defaults.file) }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|err| {
            eprintln!("bad log filter {:?} ({err}), using info", self.filter);
            EnvFilter::new("info")
        })
    }
}

pub fn init() {
    init_with(LogSettings::from_env());
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        pub fn init_with(settings: LogSettings) {
            // Browser console via tracing-wasm
            let wasm_layer = tracing_wasm::WASMLayer::new(tracing_wasm::WASMLayerConfig::default());

            // A second init (hot reload) keeps the first subscriber
            let _ = tracing_subscriber::registry()
                .with(settings.env_filter())
                .with(wasm_layer)
                .try_init();

            #[cfg(feature = "console_error_panic_hook")]
            console_error_panic_hook::set_once();

            tracing::info!(version = env!("CARGO_PKG_VERSION"), filter = %settings.filter, "roomfolio logging ready");
        }
    } else {
        use std::ffi::OsStr;
        use std::path::Path;
        use once_cell::sync::OnceCell;
        use tracing_appender::non_blocking::WorkerGuard;
        use tracing_subscriber::fmt;

        static FILE_GUARD: OnceCell<WorkerGuard> = OnceCell::new();

        pub fn init_with(settings: LogSettings) {
            let console_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
                .compact();

            let log_path = Path::new(&settings.file);
            let (nb_writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::daily(
                log_path.parent().unwrap_or(Path::new(".")),
                log_path.file_name().unwrap_or(OsStr::new("roomfolio.log")),
            ));
            let _ = FILE_GUARD.set(guard);

            let file_layer = fmt::layer()
                .with_writer(nb_writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .compact();

            let _ = tracing_subscriber::registry()
                .with(settings.env_filter())
                .with(console_layer)
                .with(file_layer)
                .try_init();

            std::panic::set_hook(Box::new(|info| {
                let payload = info
                    .payload()
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("<non-string panic>");
                let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();
                let bt = std::backtrace::Backtrace::force_capture();
                tracing::error!(target: "roomfolio::panic", %location, "{payload}\n{bt}");
            }));

            tracing::info!(version = env!("CARGO_PKG_VERSION"), filter = %settings.filter, file = %settings.file, "roomfolio logging ready");
        }
    }
}
