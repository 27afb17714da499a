use anyhow::Result;
use brainbloom_application::AppContext;
use brainbloom_core::directory::{
    EMERGENCY_CONTACTS, PeerProfile, Resource, ResourceFilter, ResourceKind,
};
use colored::Colorize;

pub async fn peers(context: &AppContext) -> Result<()> {
    println!("{}", "Finding peers...".bright_black());
    let peers = context.find_peers().await?;
    print_peers(&peers);
    Ok(())
}

pub async fn resources(
    context: &AppContext,
    kind: Option<ResourceKind>,
    search: String,
) -> Result<()> {
    let location = context.location();
    println!(
        "{}",
        format!("Finding resources near {:.4}, {:.4}...", location.lat, location.lng)
            .bright_black()
    );
    let filter = ResourceFilter { search, kind };
    let resources = context.find_resources(&filter).await?;
    print_resources(&resources);
    Ok(())
}

pub fn emergency() {
    print_emergency();
}

pub fn print_peers(peers: &[PeerProfile]) {
    if peers.is_empty() {
        println!("{}", "No peers available right now.".yellow());
        return;
    }
    for peer in peers {
        let status = if peer.is_online {
            "online".bright_green()
        } else {
            "offline".bright_black()
        };
        println!(
            "{} {} {}  [{}]",
            peer.avatar,
            format!("{}% match", peer.match_percentage).bold(),
            peer.description,
            status
        );
        println!("    {}", peer.specialties.join(", ").cyan());
    }
}

pub fn print_resources(resources: &[Resource]) {
    if resources.is_empty() {
        println!("{}", "No resources match your search.".yellow());
        return;
    }
    for resource in resources {
        let insurance = if resource.accepts_insurance {
            "accepts insurance"
        } else {
            "no insurance"
        };
        println!(
            "{} ({}) {} {:.1}",
            resource.name.bold(),
            resource.kind,
            "★".yellow(),
            resource.rating
        );
        println!("    {} | {}", resource.address, resource.phone.bright_blue());
        println!(
            "    {} | {} | {}",
            resource.availability,
            insurance,
            resource.specialties.join(", ").cyan()
        );
    }
}

pub fn print_emergency() {
    println!("{}", "If you are in immediate danger, call 911.".bright_red().bold());
    for contact in &EMERGENCY_CONTACTS {
        println!(
            "  {}  {}  {}",
            contact.phone.bright_red().bold(),
            contact.title.bold(),
            contact.subtitle.bright_black()
        );
    }
}
