//! Quote store integration tests
//!
//! Exercises the register/fetch/list flow through the public API against a
//! real file on disk.

use ewit::command::{ListCommand, ListFormat, QuoteCommand};
use ewit::error::{EwitError, Result};
use ewit::export::batch_lines;
use ewit::quote::{ChannelCaps, Quote, format_plain, parse_input, parse_line};
use ewit::storage::{QuoteStore, RecordRange, SeedPolicy, StoreConfig};
use ewit::{CogSettings, QuoteCog, Reply};
use tempfile::TempDir;

const PLAIN: ChannelCaps = ChannelCaps { embeds: false };

const LOUIS_BODY: &str = "You know what they say, hide in plain sight if you like Christmas";
const LOUIS_SOURCE: &str = "Louis";
const LOUIS_COMMENT: &str = "incoherently, on the spirit of the season";

fn open_store(temp_dir: &TempDir, seed: SeedPolicy) -> Result<QuoteStore> {
    QuoteStore::open(StoreConfig::new(temp_dir.path().join("quotes.csv")).with_seed(seed))
}

/// Integration test: stored line and formatted output for a full quote
#[test]
fn test_append_read_format_scenario() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = open_store(&temp_dir, SeedPolicy::Empty)?;

    let ordinal = store.append(&Quote::new(LOUIS_BODY, LOUIS_SOURCE, LOUIS_COMMENT))?;
    assert_eq!(ordinal, 0);

    let raw = store.read_at(0)?;
    assert_eq!(raw, [LOUIS_BODY, LOUIS_SOURCE, LOUIS_COMMENT].join("|"));

    let formatted = format_plain(&parse_line(&raw, store.delimiter())?, None);
    assert_eq!(
        formatted,
        "\"You know what they say, hide in plain sight if you like Christmas\" - Louis, incoherently, on the spirit of the season"
    );
    Ok(())
}

/// Integration test: append then read back reproduces every field
#[test]
fn test_round_trip_preserves_fields() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = open_store(&temp_dir, SeedPolicy::Empty)?;

    let quotes = vec![
        Quote::new(LOUIS_BODY, LOUIS_SOURCE, LOUIS_COMMENT),
        Quote::new("Yeah BONER!", "Phillip", ""),
        Quote::body_only("Oh really? It's Horse of course"),
        Quote::new("commas, everywhere, here", "A, B", "x, y, z"),
    ];

    for quote in &quotes {
        let ordinal = store.append(quote)?;
        let restored = parse_line(&store.read_at(ordinal)?, store.delimiter())?;
        assert_eq!(&restored, quote);
    }
    Ok(())
}

/// Integration test: opening twice neither truncates nor re-seeds
#[test]
fn test_initialization_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let store = open_store(&temp_dir, SeedPolicy::Bootstrap)?;
        store.append(&Quote::body_only("first"))?;
    }

    let store = open_store(&temp_dir, SeedPolicy::Bootstrap)?;
    assert_eq!(store.count()?, 2);
    assert_eq!(store.read_at(1)?, "first||");
    Ok(())
}

/// Integration test: ordinals follow append order, bootstrap counted
#[test]
fn test_ordinal_stability() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = open_store(&temp_dir, SeedPolicy::Bootstrap)?;

    let bodies: Vec<String> = (0..25).map(|i| format!("quote {}", i)).collect();
    for body in &bodies {
        store.append(&Quote::body_only(body.as_str()))?;
    }

    assert_eq!(store.count()?, bodies.len() + 1);
    for (i, body) in bodies.iter().enumerate() {
        let quote = parse_line(&store.read_at(i + 1)?, store.delimiter())?;
        assert_eq!(&quote.body, body);
    }

    assert!(matches!(
        store.read_at(store.count()?),
        Err(EwitError::IndexOutOfRange { .. })
    ));
    Ok(())
}

/// Integration test: registration input parsing
#[test]
fn test_parse_input_scenario() -> Result<()> {
    let quote = parse_input(&["Yeah BONER!", "-", "Phillip"])?;
    assert_eq!(quote.body, "Yeah BONER!");
    assert_eq!(quote.source, "Phillip");
    assert_eq!(quote.comment, "");
    Ok(())
}

/// Integration test: command flow through the cog
#[test]
fn test_cog_register_then_fetch() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = StoreConfig::new(temp_dir.path().join("quotes.csv"));
    let cog = QuoteCog::open(config, CogSettings::default())?;

    let mut tokens = vec![LOUIS_BODY.to_string(), "-".to_string(), format!("{},", LOUIS_SOURCE)];
    tokens.extend(LOUIS_COMMENT.split(' ').map(String::from));

    let reply = cog.handle_quote(&QuoteCommand::parse(&tokens), PLAIN);
    assert_eq!(reply, Reply::Text("Quote #1 added!".to_string()));

    let reply = cog.handle_quote(&QuoteCommand::parse(&["1"]), PLAIN);
    assert_eq!(
        reply.as_text(),
        Some(format_plain(&Quote::new(LOUIS_BODY, LOUIS_SOURCE, LOUIS_COMMENT), None).as_str())
    );

    let reply = cog.handle_quote(&QuoteCommand::Random, PLAIN);
    assert_eq!(reply.as_text(), Some(format!("\"{}\" - {}, {}", LOUIS_BODY, LOUIS_SOURCE, LOUIS_COMMENT).as_str()));
    Ok(())
}

/// Integration test: batched listing covers every record once, in order
#[test]
fn test_batched_listing_is_lossless() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = StoreConfig::new(temp_dir.path().join("quotes.csv")).with_seed(SeedPolicy::Empty);
    let settings = CogSettings {
        batch_chars: 64,
        ..CogSettings::default()
    };
    let cog = QuoteCog::open(config, settings)?;

    for i in 0..30 {
        cog.register(&[format!("saying number {}", i), "-".to_string(), format!("person {}", i)])?;
    }

    let command = ListCommand {
        format: ListFormat::Text,
        range: RecordRange::all(),
    };
    let Reply::Batches(batches) = cog.list(&command)? else {
        panic!("Expected batches");
    };

    let expected: Vec<String> = (0..30)
        .map(|i| format!("{}) \"saying number {}\" - person {}", i, i, i))
        .collect();
    assert_eq!(batches.join("\n"), expected.join("\n"));
    for batch in &batches {
        assert!(batch.chars().count() <= 64);
    }
    assert_eq!(batches, batch_lines(&expected, 64));
    Ok(())
}
