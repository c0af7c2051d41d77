//! Seed data: the floor's resources and the roster of users that may occupy them.

use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
    time::Instant,
};
use thiserror::Error;
use tracing::debug;

mod models;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone)]
pub struct SeedData {
    pub resources: Vec<ResourceRecord>,
    pub users: Vec<User>,
}

impl SeedData {
    /// Reads both JSON documents from disk.
    pub fn from_files<P, Q>(resources_path: P, users_path: Q) -> Result<Self, self::Error>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let resources = read_resources(File::open(resources_path)?)?;
        let users = read_users(File::open(users_path)?)?;
        Ok(Self { resources, users })
    }

    /// Parses both JSON documents from memory, typically a fetched response body.
    pub fn from_slices(resources: &[u8], users: &[u8]) -> Result<Self, self::Error> {
        Ok(Self {
            resources: read_resources(resources)?,
            users: read_users(users)?,
        })
    }
}

pub fn read_resources<R: Read>(reader: R) -> Result<Vec<ResourceRecord>, self::Error> {
    read_json("resources", reader)
}

pub fn read_users<R: Read>(reader: R) -> Result<Vec<User>, self::Error> {
    read_json("users", reader)
}

fn read_json<T, R>(what: &str, reader: R) -> Result<Vec<T>, self::Error>
where
    T: DeserializeOwned,
    R: Read,
{
    debug!("Loading {what}...");
    let now = Instant::now();
    let values: Vec<T> = serde_json::from_reader(BufReader::new(reader))?;
    debug!("Loading {} {what} took {:?}", values.len(), now.elapsed());
    Ok(values)
}
