use super::*;

#[test]
fn search_rows_use_application_id_as_name() {
    let stdout = "Spotify\tcom.spotify.Client\tOnline music streaming service\t1.2.31\n\
                  spotify-qt\tio.github.kraxarn.spotify-qt\tLightweight Spotify client\t3.11\n";
    let results = parse_search(stdout);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].name, "com.spotify.Client");
    assert_eq!(
        results[0].display_label,
        "Spotify (com.spotify.Client) 1.2.31 - Online music streaming service"
    );
    assert_eq!(results[1].provider.as_str(), NAME);
}

#[test]
fn search_skips_header_and_blank_lines() {
    let stdout = "Name\tApplication ID\tDescription\tVersion\n\nOBS Studio\tcom.obsproject.Studio\t\t30.1\n";
    let results = parse_search(stdout);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "com.obsproject.Studio");
}

#[test]
fn search_handles_space_aligned_columns() {
    let stdout = "Discord    com.discordapp.Discord    Messaging    0.0.50\n";
    let results = parse_search(stdout);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "com.discordapp.Discord");
}

#[test]
fn search_with_no_matches_is_empty() {
    assert!(parse_search("No matches found\n").is_empty());
}

#[test]
fn list_reads_name_id_and_version() {
    let stdout = "Spotify\tcom.spotify.Client\t1.2.31\nFirefox\torg.mozilla.firefox\n";
    let packages = parse_list(stdout);
    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].id, "com.spotify.Client");
    assert_eq!(packages[0].version.as_deref(), Some("1.2.31"));
    assert_eq!(packages[1].version, None);
}

#[test]
fn transactions_are_non_interactive() {
    assert_eq!(
        command(&["install", "-y"], &["com.spotify.Client".to_string()]),
        vec!["flatpak", "install", "-y", "com.spotify.Client"]
    );
}
