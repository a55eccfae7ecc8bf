#![doc = "deck-sync-core: flashcard extraction and AnkiConnect reconciliation."]

//! This crate holds all business logic of deck-sync: the heading tracker and
//! card grammar, the create-or-update reconciler, the optional enhancement
//! client, and the pipeline tying them together. The CLI crate only adds
//! argument parsing, config loading and a file-backed workspace.
//!
//! # Usage
//! Depend on this crate for extraction ([`extract::extract_cards`]) or a full
//! run ([`synchronise::scan_and_sync`]) against any [`contract::RemoteStore`].

pub mod anki;
pub mod config;
pub mod contract;
pub mod enhance;
pub mod error;
pub mod extract;
pub mod heading;
pub mod model;
pub mod reconcile;
pub mod synchronise;
