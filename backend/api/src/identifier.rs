use std::future::Future;

use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::database::DatabaseError;

/// Length of server generated identifiers.
pub const IDENTIFIER_LENGTH: usize = 10;

/// Draws `IDENTIFIER_LENGTH` characters uniformly from `[A-Za-z0-9]`.
pub fn generate_identifier() -> String {
	rand::thread_rng()
		.sample_iter(&Alphanumeric)
		.take(IDENTIFIER_LENGTH)
		.map(char::from)
		.collect()
}

#[derive(Debug, thiserror::Error)]
pub enum IdentifierError {
	#[error("no unused identifier found after {0} attempts")]
	Exhausted(u32),
	#[error(transparent)]
	Database(#[from] DatabaseError),
}

pub type Generator = Box<dyn Fn() -> String + Send + Sync>;

/// Finds identifiers that are not yet in use.
///
/// The check and the later insert are separate round trips, a concurrent
/// writer can still claim the identifier in between. Callers rely on the
/// primary key to reject the loser.
pub struct IdentifierAllocator {
	max_attempts: u32,
	generate: Generator,
}

impl IdentifierAllocator {
	pub fn new(max_attempts: u32) -> Self {
		Self::with_generator(max_attempts, Box::new(generate_identifier))
	}

	pub fn with_generator(max_attempts: u32, generate: Generator) -> Self {
		Self { max_attempts, generate }
	}

	pub async fn allocate<F, Fut>(&self, mut in_use: F) -> Result<String, IdentifierError>
	where
		F: FnMut(String) -> Fut,
		Fut: Future<Output = Result<bool, DatabaseError>>,
	{
		for attempt in 1..=self.max_attempts {
			let candidate = (self.generate)();

			if !in_use(candidate.clone()).await? {
				return Ok(candidate);
			}

			tracing::debug!(attempt, uid = %candidate, "identifier collision, retrying");
		}

		tracing::warn!(attempts = self.max_attempts, "identifier allocation exhausted");

		Err(IdentifierError::Exhausted(self.max_attempts))
	}
}
