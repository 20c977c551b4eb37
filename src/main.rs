use clap::Parser;
use deepfake_detector::{cli, client, config, contact, error, render, session};
use cli::{Cli, Commands};
use client::DetectorClient;
use config::Config;
use deepfake_detector_common::{render as render_result, AnalysisResult};
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use session::Session;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .parse_default_env()
        .init();

    let config = Config::load()?;
    let api = config.api_config(cli.api_base_url.as_deref());
    log::debug!("API base URL: {}", api.base_url());

    match cli.command {
        Commands::Analyze { image, method, json } => {
            let method = method.unwrap_or(config.default_method);
            let client = DetectorClient::new(api)?;
            let mut session = Session::new(client, config.intake_limits(), method);

            let upload = session.select_path(&image)?;
            if !json {
                println!("🔍 deepfake-detector - 画像解析\n");
                println!("- 画像: {} ({})", upload.file_name, method.label());
            }

            let spinner = if json { None } else { Some(analysis_spinner()) };
            let result = session.analyze().await?;
            if let Some(spinner) = spinner {
                spinner.finish_and_clear();
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let view = render_result(&result, &config.source_labels());
                println!("{}", render::format_view(&view));
            }

            if let AnalysisResult::Failure { .. } = result {
                std::process::exit(1);
            }
        }

        Commands::Contact { name, email, subject, message } => {
            println!("✉️ deepfake-detector - お問い合わせ\n");
            let message = contact::collect_contact_message(name, email, subject, message)?;
            let client = DetectorClient::new(api)?;

            match client.submit_contact(&message).await? {
                Ok(text) => println!("\n✅ {}", text),
                Err(text) => {
                    println!("\n❌ {}", text);
                    std::process::exit(1);
                }
            }
        }

        Commands::Health => {
            let client = DetectorClient::new(api)?;
            let status = client.health().await?;

            println!("バックエンド: {}", client.api().base_url());
            if let Some(message) = &status.message {
                println!("  {}", message);
            }
            println!("  Basic model: {}", status.basic_model_status.as_deref().unwrap_or("-"));
            println!("  TensorFlow: {}", status.tensorflow_status.as_deref().unwrap_or("-"));
            println!(
                "  Google Docs: {}",
                status.google_doc_integration.as_deref().unwrap_or("-")
            );
            if !status.allowed_origins.is_empty() {
                println!("  Allowed origins: {}", status.allowed_origins.join(", "));
            }
        }

        Commands::Config { set_api_base_url, set_max_upload_mb, set_method, show } => {
            let mut config = config;

            if let Some(url) = set_api_base_url {
                config.set_api_base_url(url)?;
                println!("✔ 接続先を設定しました");
            }

            if let Some(megabytes) = set_max_upload_mb {
                config.set_max_upload_mb(megabytes)?;
                println!("✔ アップロード上限を {}MB に設定しました", megabytes);
            }

            if let Some(method) = set_method {
                config.set_default_method(method)?;
                println!("✔ 既定の検出方式を {} に設定しました", method);
            }

            if show {
                println!("設定:");
                println!("  接続先: {}", api.base_url());
                println!(
                    "  設定ファイルの接続先: {}",
                    config.api_base_url.as_deref().unwrap_or("未設定")
                );
                println!("  アップロード上限: {}MB", config.max_upload_mb);
                println!("  既定の検出方式: {}", config.default_method);
                for (tag, label) in &config.source_labels {
                    println!("  表示名: {} → {}", tag, label);
                }
            }
        }
    }

    Ok(())
}

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Analyzing image...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
