use anyhow::Result;

use vitrine_core::{content::ContentFetcher, AppConfig};

use crate::Collection;

pub async fn run(config: &AppConfig, collection: Collection) -> Result<()> {
    let fetcher = ContentFetcher::new(config)?;

    match collection {
        Collection::Certificates => {
            let items = fetcher.certificates().await?;
            if items.is_empty() {
                println!("No certificates.");
            }
            for (index, cert) in items.iter().enumerate() {
                println!(
                    "{:<12} {:<40} {}",
                    cert.identity(index),
                    cert.display_title(),
                    fetcher.resolve_certificate_image(&cert.image)
                );
            }
        }
        Collection::Courses => {
            let items = fetcher.courses().await?;
            if items.is_empty() {
                println!("No courses.");
            }
            for course in &items {
                println!("{:<12} {}", course.start_date_ymd(), course.duration);
            }
        }
        Collection::Trainings => {
            let items = fetcher.trainings().await?;
            if items.is_empty() {
                println!("No trainings.");
            }
            for training in &items {
                println!(
                    "{:<30} {:<20} {:<12} {}",
                    training.name,
                    training.icon.as_deref().unwrap_or("-"),
                    training.start_date.as_deref().unwrap_or("-"),
                    training.duration.as_deref().unwrap_or("-")
                );
            }
        }
        Collection::Placements => {
            let items = fetcher.placements().await?;
            if items.is_empty() {
                println!("No placements.");
            }
            for p in &items {
                println!(
                    "{:<24} {:<28} {:<20} {:<12} {}",
                    p.name,
                    p.role,
                    p.company,
                    p.package,
                    fetcher.resolve_image_url(&p.image)
                );
            }
        }
        Collection::Contacts => {
            let items = fetcher.contacts().await?;
            if items.is_empty() {
                println!("No contacts.");
            }
            // The footer shows the last entry; list them all here
            for contact in &items {
                println!(
                    "mobile: {}  email: {}  instagram: {}  linkedin: {}",
                    contact.mobile.as_deref().unwrap_or("-"),
                    contact.email.as_deref().unwrap_or("-"),
                    contact.instagram.as_deref().unwrap_or("-"),
                    contact.linkedin.as_deref().unwrap_or("-")
                );
            }
        }
    }

    Ok(())
}
