//! Binary entry point: load the default league database, simulate one season
//! for every league and print the resulting tables.
use anyhow::Context;
use league_sim::{Session, Settings};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::from_default_env().add_directive(
        "league_sim=info"
            .parse()
            .context("invalid default log directive")?,
    );
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let settings = Settings::default();
    let session = Session::initialize(&settings).with_context(|| {
        format!("failed initial load of {}", settings.db_path.display())
    })?;

    let leagues = session
        .simulate_all_leagues()
        .context("season simulation failed")?;

    for league in &leagues {
        println!("{league}");
        println!("{:<24} {:>4} {:>4} {:>4} {:>4} {:>4}", "Team", "Pts", "MP", "GS", "GC", "GD");
        for row in session.get_table(league)? {
            let s = row.standings;
            println!(
                "{:<24} {:>4} {:>4} {:>4} {:>4} {:>4}",
                row.team_name, s.points, s.matches_played, s.goals_scored, s.goals_conceded, s.goal_diff
            );
        }
        println!();
    }

    Ok(())
}
