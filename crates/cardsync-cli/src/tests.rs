use std::str::FromStr;

use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["cardsync", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli = Cli::try_parse_from(["cardsync", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["cardsync"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn sync_variants_single_set() {
    let cli = Cli::try_parse_from(["cardsync", "sync-variants", "--set", "sv08.5"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::SyncVariants {
            set: Some(ref s),
            all_sets: false,
            dry_run: false,
            skip_sealed: false,
        }) if s == "sv08.5"
    ));
}

#[test]
fn sync_variants_all_sets_dry_run() {
    let cli = Cli::try_parse_from(["cardsync", "sync-variants", "--all-sets", "--dry-run"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::SyncVariants {
            set: None,
            all_sets: true,
            dry_run: true,
            ..
        })
    ));
}

#[test]
fn sync_variants_requires_a_target() {
    assert!(Cli::try_parse_from(["cardsync", "sync-variants"]).is_err());
    assert!(Cli::try_parse_from(["cardsync", "sync-variants", "--dry-run"]).is_err());
}

#[test]
fn sync_variants_rejects_both_targets() {
    assert!(
        Cli::try_parse_from(["cardsync", "sync-variants", "--set", "sv10", "--all-sets"]).is_err()
    );
}

#[test]
fn map_groups_flags() {
    let cli = Cli::try_parse_from(["cardsync", "map-groups", "--apply"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::MapGroups {
            apply: true,
            dry_run: false
        })
    ));
}

#[test]
fn sync_prices_single_set() {
    let cli = Cli::try_parse_from(["cardsync", "sync-prices", "--set", "sv10", "--dry-run"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::SyncPrices {
            set: Some(ref s),
            all_sets: false,
            dry_run: true,
        }) if s == "sv10"
    ));
}

#[test]
fn sync_prices_requires_a_target() {
    assert!(Cli::try_parse_from(["cardsync", "sync-prices"]).is_err());
}

#[test]
fn grade_parses_decimal_prices() {
    let cli = Cli::try_parse_from([
        "cardsync", "grade", "--raw", "50", "--grade9", "200.50", "--grade10", "500",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Grade {
        raw,
        grade9,
        grade10,
        policy,
    }) = cli.command
    else {
        panic!("expected grade command");
    };
    assert_eq!(raw, Decimal::from(50));
    assert_eq!(grade9, Some(Decimal::from_str("200.50").expect("decimal")));
    assert_eq!(grade10, Some(Decimal::from(500)));
    assert!(policy.is_none());
}

#[test]
fn grade_requires_raw_price() {
    assert!(Cli::try_parse_from(["cardsync", "grade", "--grade10", "500"]).is_err());
}

#[test]
fn grade_rejects_non_numeric_price() {
    assert!(Cli::try_parse_from(["cardsync", "grade", "--raw", "fifty"]).is_err());
}

#[test]
fn set_target_from_args() {
    assert_eq!(
        SetTarget::from_args(Some("sv10".to_string()), false),
        SetTarget::One("sv10".to_string())
    );
    assert_eq!(SetTarget::from_args(None, true), SetTarget::All);
}
