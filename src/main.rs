use etax_sahayak::apis::llm::init_llm_manager;
use etax_sahayak::arguments::{self, patterns};
use etax_sahayak::config::{load_config, load_config_from_path};
use etax_sahayak::logger::{self, LogTag};
use etax_sahayak::paths::ensure_all_directories;
use etax_sahayak::webserver;

#[tokio::main]
async fn main() {
    // Directories must exist before the logger opens its file
    if let Err(e) = ensure_all_directories() {
        eprintln!("Failed to create data directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if patterns::is_help_requested() {
        arguments::print_help();
        return;
    }

    arguments::print_debug_info();

    logger::info(LogTag::System, "Starting e-Tax Sahayak portal");

    let config_result = match arguments::get_config_path_override() {
        Some(path) => load_config_from_path(&path),
        None => load_config(),
    };
    if let Err(e) = config_result {
        logger::error(LogTag::Config, &format!("Failed to load configuration: {}", e));
        std::process::exit(1);
    }

    // A portal with no AI provider still serves pages; analysis requests fail
    if let Err(e) = init_llm_manager() {
        logger::warning(
            LogTag::Llm,
            &format!("LLM provider setup failed, audit analysis disabled: {}", e),
        );
    }

    if let Err(e) = ctrlc::set_handler(|| {
        logger::info(LogTag::System, "Shutdown signal received");
        webserver::shutdown();
    }) {
        logger::warning(LogTag::System, &format!("Failed to set Ctrl-C handler: {}", e));
    }

    if let Err(e) = webserver::start_server().await {
        logger::error(LogTag::Webserver, &format!("Server error: {}", e));
        logger::flush();
        std::process::exit(1);
    }

    logger::info(LogTag::System, "Shutdown complete");
    logger::flush();
}
