use portfolio_site::commands::play_terminal;
use portfolio_site::config::AppConfig;
use portfolio_site::terminal::TerminalEntry;
use std::time::Duration;
use tokio::time::Instant;

fn config_for(data_file: &str) -> AppConfig {
    AppConfig::load_from_args(["portfolio-site", "--data-file", data_file]).expect("config")
}

#[tokio::test(start_paused = true)]
async fn test_play_terminal_types_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("portfolio.json");
    std::fs::write(
        &data,
        r#"{"projects": [], "skills": [{"items": [{"name": "Rust"}, {"name": "Go"}]}]}"#,
    )
    .unwrap();

    let out = play_terminal(&config_for(&data.to_string_lossy()), Vec::new())
        .await
        .unwrap();
    let out = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], ">$ skills: Rust, Go");
    assert_eq!(lines[1], ">$ job: AI Engineer");
    assert!(lines[3].starts_with(">$ project: "));
    assert!(out.ends_with('\n'));
}

#[tokio::test(start_paused = true)]
async fn test_play_terminal_pacing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&dir.path().join("missing.json").to_string_lossy());
    config.terminal.prompt = "$".to_string();
    config.terminal.entries = vec![TerminalEntry::new("a", "b")];
    config.terminal.char_delay_ms = 10;
    config.terminal.line_delay_ms = 100;

    let start = Instant::now();
    let out = play_terminal(&config, Vec::new()).await.unwrap();

    // " skills: " and " a: b", each behind a 1-char prompt with one switch
    // step, and a pause after each line
    let steps = (1 + 1 + " skills: ".len()) + (1 + 1 + " a: b".len());
    let expected = 10 * steps as u64 + 2 * 100;
    assert_eq!(start.elapsed(), Duration::from_millis(expected));
    assert_eq!(String::from_utf8(out).unwrap(), "$ skills: \n$ a: b\n");
}
