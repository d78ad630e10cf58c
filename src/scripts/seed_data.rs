use anyhow::{Context, Result};
use artist_catalog::config::AppConfig;
use artist_catalog::model::{Artwork, Contact, Document, Exhibition, Record, Series};
use artist_catalog::seed;
use artist_catalog::store::{DirStorage, Storage};
use serde::Serialize;

/// Write one seed file unless it already exists
async fn write_seed<T: Serialize + ?Sized>(
    storage: &DirStorage,
    file_name: &str,
    data: &T,
    force: bool,
) -> Result<()> {
    let path = storage.dir().join(file_name);
    if path.exists() && !force {
        println!("Skipping {} (already exists, use --force to overwrite)", path.display());
        return Ok(());
    }

    let json = serde_json::to_string_pretty(data)?;
    let written = storage
        .write(file_name, &json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Seeded {}", written.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let force = std::env::args().skip(1).any(|arg| arg == "--force");
    let config = AppConfig::load()?;
    let storage = DirStorage::new(&config.storage.data_dir);

    println!("Writing seed data to {}", storage.dir().display());

    let artworks = seed::artworks();
    write_seed(&storage, Artwork::FILE_NAME, &artworks, force).await?;
    write_seed(&storage, Exhibition::FILE_NAME, &seed::exhibitions(), force).await?;
    write_seed(&storage, Series::FILE_NAME, &seed::series(), force).await?;
    write_seed(&storage, Contact::FILE_NAME, &seed::contact(), force).await?;

    println!("Seed complete ({} artworks)", artworks.len());

    Ok(())
}
