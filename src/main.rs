use clap::Parser;
use student_roster::utils::logger::{self, LogFormat};
use student_roster::utils::validation::Validate;
use student_roster::{CliConfig, ConfigProvider, InteractionShell, RosterConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(format, cli.verbose);

    tracing::info!("Starting student-roster");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if let Err(e) = cli.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    match cli.config.clone() {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);

            let mut config = match RosterConfig::from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 Make sure the file exists and is valid TOML format");
                    std::process::exit(1);
                }
            };

            // 命令列旗標覆蓋設定檔
            if cli.no_seed {
                config.shell.seed_demo_data = Some(false);
                config.students.clear();
            }
            if cli.no_pause {
                config.shell.pause_after_action = Some(false);
            }

            if let Err(e) = config.validate() {
                tracing::error!("❌ Configuration validation failed: {}", e);
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(1);
            }
            tracing::info!("✅ Configuration loaded and validated successfully");

            run_shell(config)
        }
        None => run_shell(cli),
    }
}

fn run_shell<C: ConfigProvider>(config: C) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut shell = InteractionShell::new(stdin.lock(), std::io::stdout(), config)?;
    shell.run()?;
    Ok(())
}
