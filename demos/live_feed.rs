use std::sync::{Arc, Mutex};

use cricket_feed_rs::{ConnectionManager, EventKind, MatchFeed, Roster, SocketConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cricket_feed_rs=debug".into()),
        )
        .init();

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "wss://sports-z9px.onrender.com/socket".to_string());

    let config = SocketConfig::new(url);
    let match_id = config.default_match_id.clone();
    let manager = ConnectionManager::new(config)?;
    let feed = Arc::new(Mutex::new(MatchFeed::new(Roster::demo())));

    println!("Connecting to the match feed...");

    let sink = Arc::clone(&feed);
    let _events = manager.subscribe_events(move |event| {
        let mut feed = sink.lock().unwrap();

        match &event.kind {
            EventKind::Ball(p) | EventKind::Boundary(p) => {
                println!("[{}] {} run(s) - {}", event.kind.label(), p.runs, p.commentary)
            }
            EventKind::Wicket(p) => {
                println!("[WICKET] {} {} - {}", p.player_out, p.dismissal, p.commentary)
            }
            EventKind::MatchStatus(p) => println!("[STATUS] {} - {}", p.status, p.summary),
            EventKind::Unknown { kind, .. } => println!("[{}]", kind),
        }

        let state = feed.push(event.clone()).clone();
        println!(
            "  {} {}/{} ({} ov, RR {:.2}) | {} & {} | bowling: {}\n",
            feed.roster().batting_team(&state.match_status),
            state.total_runs,
            state.wickets,
            state.overs_display(),
            state.run_rate(),
            feed.roster().batsman_display(&state.current_batsmen[0]),
            feed.roster().batsman_display(&state.current_batsmen[1]),
            state.current_bowler,
        );
    });

    let _states = manager.subscribe_state(|state| println!("Connection: {}", state));
    let _errors = manager.subscribe_errors(|error| eprintln!("Error: {}", error));

    manager.connect();

    // Give the auto-join a moment, then ask for everything we missed
    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    manager.request_history(&match_id);

    tokio::signal::ctrl_c().await?;
    println!("Disconnecting...");
    manager.disconnect();

    Ok(())
}
