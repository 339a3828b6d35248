use clap::Parser;
use shelf_audit::{cli, config, dashboard, error, logging, overlay, report, scanner, session_file, upload};
use cli::{Cli, Commands};
use config::Config;
use error::{Result, ShelfAuditError};
use shelf_audit_common::{CaptureSession, ColorPolicy, OmitOutcome, OmitReason};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Dashboard => {
            println!("🛒 shelf-audit - Dashboard\n");
            dashboard::run_dashboard(&config, cli.backend).await?;
        }

        Commands::Analyze { image, segment, output, annotate } => {
            println!("🛒 shelf-audit - Análisis\n");

            let layout = config.layout()?;
            let segment = segment.unwrap_or_default();
            if !segment.is_empty() && !layout.contains(&segment) {
                return Err(shelf_audit_common::Error::UnknownSegment(segment).into());
            }

            // 1. 画像チェック
            println!("[1/3] Verificando imagen...");
            let info = scanner::inspect_image(&image)?;
            println!("✔ {} ({}x{})\n", info.file_name, info.dimensions.0, info.dimensions.1);

            // 2. アップロード
            println!("[2/3] Procesando la imagen ({})...", cli.backend.label());
            let records = upload::upload_image(&info, cli.backend, &config).await?;
            let session = CaptureSession::new(segment, info.to_meta(), records)?;
            println!("✔ {} detecciones\n", session.records.len());

            // 3. 結果
            println!("[3/3] Resultados");
            println!("{}", report::format_results(&session));

            if let Some(path) = annotate {
                let marks = overlay::render_overlay(&info.path, &session.records, &path)?;
                println!("✔ Imagen marcada: {} ({} marcas)", path.display(), marks.len());
            }

            if let Some(path) = output {
                session_file::save_session(&path, &session)?;
                println!("✔ Resultado guardado: {}", path.display());
            }
        }

        Commands::Omit { input, id, reason, output } => {
            let reason = OmitReason::from_label(&reason)
                .ok_or_else(|| ShelfAuditError::InvalidArgument("motivo vacío".into()))?;

            let mut session = session_file::load_session(&input)?;
            match session.omit(id, &reason) {
                OmitOutcome::Applied => println!("✔ Alerta {} omitida: {}", id, reason),
                other => log::info!("除外は適用されませんでした: id={} {:?}", id, other),
            }

            let target = output.unwrap_or(input);
            session_file::save_session(&target, &session)?;
            println!("{}", report::format_statistics(&session.statistics()));
        }

        Commands::Summary { input, high, mid } => {
            let session = session_file::load_session(&input)?;
            let base = config.policy()?;
            let policy = ColorPolicy::new(high.unwrap_or(base.high), mid.unwrap_or(base.mid))?;

            println!("{}", report::format_results(&session));
            let color = policy.classify(session.statistics().percentage);
            println!("Estado: {:?} ({})", color, color.hex());
        }

        Commands::Config { set_endpoint, show } => {
            let mut config = config;

            if let Some(url) = set_endpoint {
                config.set_endpoint(url)?;
                println!("✔ URL configurada");
            }

            if show {
                println!("Configuración:");
                println!("  URL: {}", config.get_endpoint().unwrap_or_else(|_| "sin configurar".into()));
                println!("  Espera simulada: {}ms", config.simulated_delay_ms);
                println!("  Umbrales: high={} mid={}", config.color_policy.high, config.color_policy.mid);
                match &config.layout_path {
                    Some(path) => println!("  Distribución: {}", path.display()),
                    None => println!("  Distribución: integrada"),
                }
            }
        }
    }

    Ok(())
}
