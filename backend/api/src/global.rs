use std::sync::Arc;

use common::context::Context;

use crate::config::AppConfig;
use crate::database::RecordStore;
use crate::identifier::IdentifierAllocator;

pub struct GlobalState {
	pub config: AppConfig,
	pub db: Arc<dyn RecordStore>,
	pub ctx: Context,
	pub identifiers: IdentifierAllocator,
}

impl GlobalState {
	pub fn new(config: AppConfig, db: Arc<dyn RecordStore>, ctx: Context) -> Self {
		let identifiers = IdentifierAllocator::new(config.identifier.max_attempts);

		Self {
			config,
			db,
			ctx,
			identifiers,
		}
	}

	pub fn with_identifiers(mut self, identifiers: IdentifierAllocator) -> Self {
		self.identifiers = identifiers;
		self
	}
}
