use anyhow::Result;
use brainbloom_application::AppContext;
use brainbloom_core::monitor::{AgentState, MonitorReport, SystemHealth};
use colored::Colorize;
use tokio_util::sync::CancellationToken;

pub async fn run(context: &AppContext, watch: bool) -> Result<()> {
    let monitor = context.agent_monitor();

    if !watch {
        let report = monitor.poll_once(&[]).await;
        print_report(&report);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Polling every {}s. Press Ctrl-C to stop.",
            monitor.poll_interval().as_secs()
        )
        .bright_black()
    );

    let handle = monitor.start(CancellationToken::new());
    let mut reports = handle.subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = reports.changed() => {
                if changed.is_err() {
                    break;
                }
                let report = reports.borrow_and_update().clone();
                if let Some(report) = report {
                    print_report(&report);
                }
            }
        }
    }
    handle.stop().await;
    Ok(())
}

pub fn print_report(report: &MonitorReport) {
    let headline = match report.health {
        SystemHealth::Healthy => report.health.label().bright_green(),
        SystemHealth::Warning => report.health.label().yellow(),
        SystemHealth::Critical => report.health.label().bright_red(),
    };
    println!(
        "{} {}",
        headline.bold(),
        report.polled_at.format("%H:%M:%S").to_string().bright_black()
    );
    if let Some(error) = &report.error {
        println!("  {}", error.red());
    }

    for agent in &report.agents {
        let state = match agent.state {
            AgentState::Active => agent.state.as_ref().bright_green(),
            AgentState::Processing => agent.state.as_ref().bright_blue(),
            AgentState::Idle => agent.state.as_ref().bright_black(),
            AgentState::Error => agent.state.as_ref().bright_red(),
        };
        println!(
            "  {:<28} {:<10} {:>5.1}s {:>5.1}%  {}",
            agent.name,
            state,
            agent.response_time,
            agent.success_rate,
            agent.current_task.as_deref().unwrap_or("").bright_black()
        );
    }
    println!(
        "  {} active, {} processing, {} idle, {} error",
        report.count(AgentState::Active),
        report.count(AgentState::Processing),
        report.count(AgentState::Idle),
        report.count(AgentState::Error)
    );
}
