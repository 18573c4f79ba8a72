//! Release discovery and update classification
//!
//! This module fetches the release site, extracts release lines and artifact
//! filenames, and classifies what it finds against the installed version.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Fetcher   │────▶│    Site     │◀────│ Classifier  │────▶ State
//! │   (GET)     │     │ (URLs, cmp) │     │(patch/minor │
//! └─────────────┘     └─────────────┘     │   /major)   │
//!                        │       │        └─────────────┘
//!                        ▼       ▼
//!                 ┌─────────┐ ┌──────────┐
//!                 │  Index  │ │ Download │
//!                 │ (lines) │ │ (files)  │
//!                 └─────────┘ └──────────┘
//! ```
//!
//! # Modules
//!
//! - [`fetcher`]: Page fetcher trait and reqwest implementation
//! - [`index`]: Release line extraction from the root index
//! - [`download`]: Artifact filename matching in a release line listing
//! - [`site`]: URL layout plus the index and download lookups
//! - [`classifier`]: Patch, minor and major update checks
//! - [`state`]: Stored check results
//! - [`error`]: Error types for fetching and persistence
//! - [`semver`]: Version parsing and release lines
//! - [`types`]: Common types like `DownloadMatch` and `UpdateStatus`

pub mod classifier;
pub mod download;
pub mod error;
pub mod fetcher;
pub mod index;
pub mod semver;
pub mod site;
pub mod state;
pub mod types;
