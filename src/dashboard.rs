//! 対話式ダッシュボード
//!
//! ビューコントローラを端末上で操作する:
//! マップ選択 → 撮影画像の指定 → 解析 → 結果確認・除外 → マップへ戻る

use crate::backend::UploadBackend;
use crate::config::Config;
use crate::error::{Result, ShelfAuditError};
use crate::report::{format_layout, format_results};
use crate::scanner::inspect_image;
use crate::upload::upload_image;
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use shelf_audit_common::{CaptureSession, OmitOutcome, OmitReason, View, ViewController};
use std::path::PathBuf;
use std::time::Duration;

/// アップロード失敗時に表示するメッセージ
const UPLOAD_ERROR_MESSAGE: &str = "Error al procesar la imagen. Intente de nuevo.";

/// 結果画面の操作
enum ResultsAction {
    Omit,
    Retake,
    Back,
}

/// ダッシュボードを起動（マップで「Salir」を選ぶまで循環）
pub async fn run_dashboard(config: &Config, backend: UploadBackend) -> Result<()> {
    let mut controller = ViewController::new(config.layout()?, config.policy()?);

    loop {
        match controller.view().clone() {
            View::Selection => {
                if !selection_screen(&mut controller)? {
                    break;
                }
            }
            View::Capture { segment, error, .. } => {
                capture_screen(&mut controller, &segment, error.as_deref(), backend, config).await?;
            }
            View::Loading { .. } => {
                // アップロードは capture_screen 内で完了まで待つ
                controller.upload_failed(UPLOAD_ERROR_MESSAGE)?;
            }
            View::Results { session } => {
                results_screen(&mut controller, &session)?;
            }
        }
    }

    println!("\nResumen de la sesión:");
    for (name, status) in controller.segments().iter() {
        println!("  {}: {}%", name, status.percentage);
    }

    Ok(())
}

/// マップ画面。終了が選ばれたら false
fn selection_screen(controller: &mut ViewController) -> Result<bool> {
    println!("\n{}", format_layout(controller.layout(), controller.segments()));

    let mut items: Vec<String> = controller
        .layout()
        .segments()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    items.push("Salir".to_string());

    let choice = Select::new()
        .with_prompt("Seleccione un segmento")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| ShelfAuditError::Prompt(e.to_string()))?;

    if choice == items.len() - 1 {
        return Ok(false);
    }

    controller.select_segment(&items[choice])?;
    Ok(true)
}

/// 撮影画面: 画像パスを受け取り、解析が終わるまで待つ
async fn capture_screen(
    controller: &mut ViewController,
    segment: &str,
    error: Option<&str>,
    backend: UploadBackend,
    config: &Config,
) -> Result<()> {
    println!("\nNombre del segmento: {}", segment);
    if let Some(message) = error {
        println!("  ✗ {}", message);
    }

    let input: String = Input::new()
        .with_prompt("Ruta de la foto (vacío: cancelar)")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ShelfAuditError::Prompt(e.to_string()))?;

    let trimmed = input.trim();
    if trimmed.is_empty() {
        controller.cancel_capture()?;
        return Ok(());
    }

    let image = match inspect_image(&PathBuf::from(trimmed)) {
        Ok(info) => info,
        Err(e) => {
            println!("  ✗ {}", e);
            return Ok(());
        }
    };
    println!("Seleccionado: {}", image.file_name);

    controller.begin_upload()?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner());
    spinner.set_message("Procesando la imagen...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = upload_image(&image, backend, config).await;
    spinner.finish_and_clear();

    match result {
        Ok(records) => {
            if let Err(e) = controller.upload_succeeded(image.to_meta(), records) {
                log::warn!("検出結果を受け付けられません: {}", e);
            }
        }
        Err(e) => {
            log::warn!("アップロード失敗: {}", e);
            controller.upload_failed(UPLOAD_ERROR_MESSAGE)?;
        }
    }

    Ok(())
}

/// 結果画面
fn results_screen(controller: &mut ViewController, session: &CaptureSession) -> Result<()> {
    println!("\n{}", format_results(session));

    let percentage = session.statistics().percentage;
    let mut actions = Vec::new();
    let mut labels = Vec::new();
    if session.records.iter().any(|r| r.status.is_live_alert()) {
        actions.push(ResultsAction::Omit);
        labels.push("Omitir alerta".to_string());
    }
    actions.push(ResultsAction::Retake);
    labels.push("Tomar otra foto".to_string());
    actions.push(ResultsAction::Back);
    labels.push(format!("Volver al mapa ({}% completado)", percentage));

    let choice = Select::new()
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| ShelfAuditError::Prompt(e.to_string()))?;

    match actions[choice] {
        ResultsAction::Omit => {
            if let Some((id, reason)) = prompt_omit(session)? {
                let outcome = controller.omit(id, &reason)?;
                if outcome != OmitOutcome::Applied {
                    log::debug!("除外は適用されませんでした: id={} {:?}", id, outcome);
                }
            }
        }
        ResultsAction::Retake => controller.retake()?,
        ResultsAction::Back => {
            let (segment, status) = controller.back_to_selection()?;
            log::info!("{}: {}% ({:?})", segment, status.percentage, status.color);
        }
    }

    Ok(())
}

/// 除外するアラートと理由を選ぶ。取り消したら None
fn prompt_omit(session: &CaptureSession) -> Result<Option<(i64, OmitReason)>> {
    // 除外済みのアラートには操作を出さない
    let candidates: Vec<(i64, String)> = session
        .alerts()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.status.is_live_alert())
        .map(|(idx, r)| (r.id, format!("{}. {} - {}", idx + 1, r.name, r.status)))
        .collect();

    let labels: Vec<&str> = candidates.iter().map(|(_, l)| l.as_str()).collect();
    let choice = Select::new()
        .with_prompt("Alerta a omitir")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| ShelfAuditError::Prompt(e.to_string()))?;
    let id = candidates[choice].0;

    let presets = OmitReason::PRESETS;
    let mut reasons: Vec<&str> = presets.iter().map(|r| r.label()).collect();
    reasons.push(OmitReason::OTHER_LABEL);

    let reason_idx = Select::new()
        .with_prompt("Motivo")
        .items(&reasons)
        .default(0)
        .interact()
        .map_err(|e| ShelfAuditError::Prompt(e.to_string()))?;

    if let Some(preset) = presets.get(reason_idx) {
        return Ok(Some((id, preset.clone())));
    }

    let text: String = Input::new()
        .with_prompt("Especifique")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ShelfAuditError::Prompt(e.to_string()))?;

    Ok(OmitReason::other(&text).map(|reason| (id, reason)))
}
