use citriq::cli::{exit_code, internal_error, run, user_error};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("CITRIQ_LOG", "warn"))
        .format_timestamp(None)
        .init();

    // Bold and colour output on Windows consoles; nothing to do elsewhere
    let _ = enable_ansi_support::enable_ansi_support();

    if let Err(e) = run() {
        if exit_code(&e) == 1 {
            user_error(&format!("{:#}", e));
        }

        let mut message = e.to_string();
        let mut source = e.source();
        if source.is_some() {
            message.push_str("\n\nCaused by:");
            let mut indent = 1;
            while let Some(err) = source {
                message.push_str(&format!("\n{:indent$}  {}", "", err));
                source = err.source();
                indent += 1;
            }
        }
        internal_error(&message);
    }
}
