//! The pinpoint store: resources, their occupants and the transitions between
//! snapshots triggered by booking and unbooking.
//!
//! Every transition borrows the current snapshot and returns a new one.
//! On error the current snapshot is left as it was.

use std::{collections::HashSet, sync::Arc, time::Instant};

use rand::Rng;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

mod config;
mod models;
pub use config::*;
pub use models::*;

use crate::{
    geometry::{GeoEngine, Geometry},
    seed::{ResourceRecord, User},
    shared::geo::Coordinate,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Resource id does not match any entry: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone)]
pub struct Store {
    next_id: u64,
    pinpoints: Arc<[Pinpoint]>,
    seed_users: Arc<[User]>,
    config: Arc<Config>,
    geometry: Arc<dyn Geometry>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 0,
            pinpoints: Arc::new([]),
            seed_users: Arc::new([]),
            config: Default::default(),
            geometry: Arc::new(GeoEngine),
        }
    }
}

impl Store {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Arc::new(config);
        self
    }

    pub fn with_geometry<G: Geometry + 'static>(mut self, geometry: G) -> Self {
        self.geometry = Arc::new(geometry);
        self
    }

    /// Populates an empty store from the seed data.
    ///
    /// Resources get the ids `0..resources.len()` in input order. Every unavailable
    /// resource gets an occupant drawn from `seed_users` with `rng`, the occupants
    /// follow the resources and are numbered from `resources.len()` onwards.
    pub fn initialize<R>(
        &self,
        resources: Vec<ResourceRecord>,
        seed_users: Vec<User>,
        rng: &mut R,
    ) -> Result<Self, self::Error>
    where
        R: Rng,
    {
        debug!("Initializing store...");
        let now = Instant::now();
        if self.is_initialized() {
            return Err(Error::InvalidInput("store is already initialized".into()));
        }
        let statuses = validate_resources(&resources)?;
        validate_users(&seed_users)?;

        // Outlines are independent of each other, only the occupant draw has to be sequential
        let config = &self.config;
        let geometry = &self.geometry;
        let prepared: Vec<(Resource, Option<Coordinate>)> = resources
            .into_par_iter()
            .zip(statuses.into_par_iter())
            .enumerate()
            .map(|(index, (mut record, status))| -> Result<_, self::Error> {
                // Occupants sit on the outline as delivered, before simplification
                let centroid = match status {
                    Status::Available => None,
                    Status::Unavailable => Some(centroid_of(geometry.as_ref(), &record)?),
                };
                record.shape.geometry = geometry.simplify(
                    &record.shape.geometry,
                    config.simplify_tolerance,
                    config.high_quality,
                );
                Ok((Resource::from_record(index as u64, record, status), centroid))
            })
            .collect::<Result<_, self::Error>>()?;

        let mut next_id = prepared.len() as u64;
        let mut pinpoints: Vec<Pinpoint> = Vec::with_capacity(prepared.len() * 2);
        let mut occupants: Vec<Pinpoint> = Vec::new();
        for (resource, centroid) in prepared {
            if let Some(coordinate) = centroid {
                let user = seed_users[rng.random_range(0..seed_users.len())].clone();
                occupants.push(
                    UserPoint {
                        id: next_id,
                        user,
                        coordinate,
                        location: resource.external_id.clone(),
                    }
                    .into(),
                );
                next_id += 1;
            }
            pinpoints.push(resource.into());
        }
        debug!(
            "Placed {} occupants on {} resources",
            occupants.len(),
            pinpoints.len()
        );
        pinpoints.append(&mut occupants);

        debug!("Initializing store took {:?}", now.elapsed());
        Ok(Self {
            next_id,
            pinpoints: pinpoints.into(),
            seed_users: seed_users.into(),
            ..self.clone()
        })
    }

    /// Marks the resource as unavailable and places `user` on it.
    ///
    /// An occupant already sitting on the resource is kept, booking an unavailable
    /// resource therefore adds a second occupant.
    pub fn book(&self, external_id: &str, user: User) -> Result<Self, self::Error> {
        let now = Instant::now();
        if user.id.trim().is_empty() {
            return Err(Error::InvalidInput("user has an empty id".into()));
        }
        let previous = self.require_resource(external_id)?;
        let resource_id = self.next_id + 1;
        let point_id = self.next_id + 2;

        let resource = previous.with_status(resource_id, Status::Unavailable, &self.config.booked);
        let coordinate = self
            .geometry
            .centroid(&resource.shape.geometry)
            .ok_or_else(|| Error::InvalidInput(format!("resource {external_id} has no outline")))?;
        let point = UserPoint {
            id: point_id,
            user,
            coordinate,
            location: resource.external_id.clone(),
        };

        let pinpoints: Vec<Pinpoint> = self
            .pinpoints
            .iter()
            .filter(|pinpoint| !pinpoint.is_resource(external_id))
            .cloned()
            .chain([Pinpoint::from(resource), Pinpoint::from(point)])
            .collect();

        debug!("Booking {external_id} took {:?}", now.elapsed());
        Ok(Self {
            next_id: point_id,
            pinpoints: pinpoints.into(),
            ..self.clone()
        })
    }

    /// Marks the resource as available and evicts every user located on it.
    pub fn unbook(&self, external_id: &str) -> Result<Self, self::Error> {
        let now = Instant::now();
        let previous = self.require_resource(external_id)?;
        let resource_id = self.next_id + 1;
        let resource = previous.with_status(resource_id, Status::Available, &self.config.free);

        let pinpoints: Vec<Pinpoint> = self
            .pinpoints
            .iter()
            .filter(|pinpoint| {
                !pinpoint.is_resource(external_id) && !pinpoint.is_located_at(external_id)
            })
            .cloned()
            .chain([Pinpoint::from(resource)])
            .collect();

        debug!(
            "Unbooking {external_id} evicted {} occupants in {:?}",
            self.pinpoints.len() - pinpoints.len(),
            now.elapsed()
        );
        Ok(Self {
            next_id: resource_id,
            pinpoints: pinpoints.into(),
            ..self.clone()
        })
    }

    /// Books an available resource for a random seed user, unbooks it otherwise.
    pub fn toggle<R>(&self, external_id: &str, rng: &mut R) -> Result<Self, self::Error>
    where
        R: Rng,
    {
        let resource = self.require_resource(external_id)?;
        match resource.status {
            Status::Available => {
                let user = self
                    .random_seed_user(rng)
                    .cloned()
                    .ok_or_else(|| Error::InvalidInput("no seed users to book with".into()))?;
                self.book(external_id, user)
            }
            Status::Unavailable => self.unbook(external_id),
        }
    }

    /// Picks a user uniformly from the seed roster.
    pub fn random_seed_user<R>(&self, rng: &mut R) -> Option<&User>
    where
        R: Rng,
    {
        if self.seed_users.is_empty() {
            return None;
        }
        self.seed_users.get(rng.random_range(0..self.seed_users.len()))
    }

    pub fn is_initialized(&self) -> bool {
        !self.pinpoints.is_empty()
    }

    /// The last issued id once a transition ran, the first free one after `initialize`.
    /// Ids issued by the next transition are always greater.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Every pinpoint in display order.
    pub fn pinpoints(&self) -> &[Pinpoint] {
        &self.pinpoints
    }

    pub fn seed_users(&self) -> &[User] {
        &self.seed_users
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.pinpoints.iter().filter_map(Pinpoint::as_resource)
    }

    pub fn user_points(&self) -> impl Iterator<Item = &UserPoint> {
        self.pinpoints.iter().filter_map(Pinpoint::as_user)
    }

    pub fn resource_by_external_id(&self, external_id: &str) -> Option<&Resource> {
        self.resources()
            .find(|resource| &*resource.external_id == external_id)
    }

    pub fn pinpoint_by_id(&self, id: u64) -> Option<&Pinpoint> {
        self.pinpoints.iter().find(|pinpoint| pinpoint.id() == id)
    }

    /// The pinpoint with the given id if it can be opened by a user.
    /// Only resources are selectable, occupant markers are not.
    pub fn selectable(&self, id: u64) -> Option<&Resource> {
        self.pinpoint_by_id(id)?.as_resource()
    }

    /// Users currently located on the resource.
    pub fn occupants(&self, external_id: &str) -> Vec<&UserPoint> {
        self.user_points()
            .filter(|point| &*point.location == external_id)
            .collect()
    }

    fn require_resource(&self, external_id: &str) -> Result<&Resource, self::Error> {
        self.resource_by_external_id(external_id)
            .ok_or_else(|| Error::NotFound(external_id.to_string()))
    }
}

fn centroid_of(geometry: &dyn Geometry, record: &ResourceRecord) -> Result<Coordinate, self::Error> {
    geometry.centroid(&record.shape.geometry).ok_or_else(|| {
        Error::InvalidInput(format!("resource {} has no outline", record.ext_id()))
    })
}

fn validate_resources(resources: &[ResourceRecord]) -> Result<Vec<Status>, self::Error> {
    if resources.is_empty() {
        return Err(Error::InvalidInput("resource list is empty".into()));
    }
    let mut seen: HashSet<&str> = HashSet::with_capacity(resources.len());
    resources
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let ext_id = record.ext_id();
            if ext_id.trim().is_empty() {
                return Err(Error::InvalidInput(format!(
                    "resource at position {i} has no external id"
                )));
            }
            if !seen.insert(ext_id) {
                return Err(Error::InvalidInput(format!(
                    "resource {ext_id} appears more than once"
                )));
            }
            if !record.shape.geometry.is_valid() {
                return Err(Error::InvalidInput(format!(
                    "resource {ext_id} does not have a valid polygon"
                )));
            }
            Status::from_tags(&record.tags).ok_or_else(|| {
                Error::InvalidInput(format!(
                    "resource {ext_id} must be tagged either {AVAILABLE} or {UNAVAILABLE}"
                ))
            })
        })
        .collect()
}

fn validate_users(users: &[User]) -> Result<(), self::Error> {
    if users.is_empty() {
        return Err(Error::InvalidInput("seed user list is empty".into()));
    }
    if let Some(i) = users.iter().position(|user| user.id.trim().is_empty()) {
        return Err(Error::InvalidInput(format!(
            "seed user at position {i} has no id"
        )));
    }
    Ok(())
}
