use super::state::AppState;
use super::ui;
use crate::core::market::{ImageKind, ImageUpload, MarketplaceActions, TokenReceipt};
use crate::core::token::TokenDraft;
use crate::providers::FallbackMarketData;
use anyhow::{Context, Result};
use futures::future::join_all;
use std::path::Path;
use tracing::{debug, info, warn};

async fn read_image(path: &Path, kind: ImageKind) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read image: {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{}.png", kind.as_str()));
    Ok(ImageUpload {
        file_name,
        bytes,
        kind,
    })
}

/// Uploads one image; a failure is logged and yields `None`.
async fn upload(api: &dyn MarketplaceActions, image: &ImageUpload) -> Option<String> {
    match api.upload_image(image).await {
        Ok(path) => {
            debug!(
                "Uploaded {} image {} to {}",
                image.kind.as_str(),
                image.file_name,
                path
            );
            Some(path)
        }
        Err(e) => {
            warn!(
                error = %e,
                "Failed to upload {} image {}, skipping",
                image.kind.as_str(),
                image.file_name
            );
            None
        }
    }
}

/// Creates a token for the connected user and reloads the leaderboards.
///
/// Image files are read before anything is sent, so a bad path fails the whole
/// command. Upload failures only drop the affected image.
pub async fn create(
    state: &mut AppState,
    draft: &TokenDraft,
    api: &dyn MarketplaceActions,
    market: &FallbackMarketData,
) -> Result<TokenReceipt> {
    let creator_id = state.connected("create a token")?.0.id;
    let valid = draft.validate()?;

    let token_image = match &draft.token_image {
        Some(path) => Some(read_image(path, ImageKind::Token).await?),
        None => None,
    };
    let mut farm_images = Vec::with_capacity(draft.farm_images.len());
    for path in &draft.farm_images {
        farm_images.push(read_image(path, ImageKind::Farm).await?);
    }

    let pb = ui::new_spinner("Uploading images...");
    let token_image_path = match &token_image {
        Some(image) => upload(api, image).await,
        None => None,
    };
    let farm_image_paths: Vec<String> =
        join_all(farm_images.iter().map(|image| upload(api, image)))
            .await
            .into_iter()
            .flatten()
            .collect();
    pb.finish_and_clear();

    let request = valid.into_request(creator_id, token_image_path, farm_image_paths);
    let receipt = api
        .create_token(&request)
        .await
        .with_context(|| format!("Failed to create token {}", request.symbol))?;
    info!("Created token {} ({})", request.name, request.symbol);

    let message = receipt
        .message
        .as_deref()
        .unwrap_or("Token created successfully");
    println!("{}", ui::style_text(message, ui::StyleType::Success));
    if let Some(token) = &receipt.token {
        let (commodity, emoji) = token.commodity.display_info();
        println!(
            "{} {} ({}) · {} · {}",
            emoji,
            token.name,
            token.symbol,
            commodity,
            token.country.name()
        );
        println!("{}", ui::style_text(token.image(), ui::StyleType::Subtle));
    }

    state.refresh_leaderboards(market).await;
    Ok(receipt)
}
