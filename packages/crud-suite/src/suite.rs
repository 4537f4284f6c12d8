//! The end-to-end CRUD scenario.

use rand::rngs::StdRng;
use rand::SeedableRng;
use user_api_client::{ClientError, UserApiClient};
use user_api_types::{UserPayload, UserRecord};

use crate::config::SuiteConfig;
use crate::error::SuiteAbort;
use crate::exerciser::{Exerciser, Lookup};
use crate::generator::{generate_user, has_update_prefix, missing_user_payload, updated_payload};

/// Counts gathered during one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteSummary {
    /// Users the server answered 201 for
    pub created: usize,
    /// Collection size right after the create phase
    pub listed_after_create: usize,
    /// Created users readable by id
    pub fetched: usize,
    /// Of those, users whose fields equal what was submitted
    pub matched: usize,
    /// Users the server answered 200 for on PUT
    pub updated: usize,
    /// Updated users whose re-read name carries the update prefix
    pub verified: usize,
    /// Users the server answered 200 or 204 for on DELETE
    pub deleted: usize,
    /// Deleted users that now read back as not found
    pub confirmed_deleted: usize,
    /// Collection size after the delete phase
    pub remaining: usize,
    /// Negative probes (get, update, delete) that did not succeed
    pub rejected_probes: usize,
}

/// One configured run of the scenario.
pub struct Suite {
    exerciser: Exerciser,
    config: SuiteConfig,
    rng: StdRng,
}

impl Suite {
    /// Builds the client from `config`.
    pub fn new(config: SuiteConfig) -> Result<Self, ClientError> {
        let client = UserApiClient::new(&config.client)?;
        Ok(Self {
            exerciser: Exerciser::new(client),
            config,
            rng: StdRng::from_entropy(),
        })
    }

    /// Replaces the random source, for reproducible addresses.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn exerciser(&self) -> &Exerciser {
        &self.exerciser
    }

    /// Runs every phase in order.
    ///
    /// # Errors
    /// - `SuiteAbort::HealthCheckFailed` if the health probe fails
    /// - `SuiteAbort::NothingCreated` if no user could be created
    ///
    /// Any other failure is reported on the console and counted in the
    /// summary without stopping the run.
    pub async fn run(&mut self) -> Result<SuiteSummary, SuiteAbort> {
        let console = *self.exerciser.console();
        console.info("Starting comprehensive CRUD tests...\n");

        if !self.exerciser.check_health().await {
            console.info("Health check failed. Aborting tests.");
            return Err(SuiteAbort::HealthCheckFailed);
        }

        let mut summary = SuiteSummary::default();

        let created = self.create_phase().await;
        summary.created = created.len();
        if created.is_empty() {
            console.info("No users were created successfully. Aborting tests.");
            return Err(SuiteAbort::NothingCreated);
        }

        self.read_phase(&created, &mut summary).await;
        self.update_phase(&created, &mut summary).await;
        self.delete_phase(&created, &mut summary).await;
        self.probe_phase(&mut summary).await;

        console.banner("CRUD TESTS COMPLETED");
        console.info(format!("Created: {} users", summary.created));
        console.info(format!(
            "Remaining after deletion: {} users",
            summary.remaining
        ));
        console.info(format!(
            "Negative probes rejected: {} of 3",
            summary.rejected_probes
        ));
        tracing::debug!(?summary, "suite finished");
        Ok(summary)
    }

    async fn pause(&self) {
        tokio::time::sleep(self.config.pause()).await;
    }

    /// Creates `user_count` users, keeping the submitted payload next to
    /// each server record.
    async fn create_phase(&mut self) -> Vec<(UserPayload, UserRecord)> {
        self.exerciser.console().banner("CREATE TESTS");

        let mut created = Vec::with_capacity(self.config.user_count);
        for index in 1..=self.config.user_count {
            let payload = generate_user(index, &mut self.rng);
            if let Some(user) = self.exerciser.create_user(&payload).await {
                created.push((payload, user));
            }
            self.pause().await;
        }
        tracing::debug!(
            requested = self.config.user_count,
            created = created.len(),
            "create phase done"
        );
        created
    }

    async fn read_phase(&self, created: &[(UserPayload, UserRecord)], summary: &mut SuiteSummary) {
        let console = self.exerciser.console();
        console.banner("READ TESTS");

        let all = self.exerciser.list_users().await;
        summary.listed_after_create = all.len();
        console.info(format!(
            "Expected {} users, got {} users",
            created.len(),
            all.len()
        ));

        for (payload, user) in created {
            if let Lookup::Found(fetched) = self.exerciser.get_user(user.id).await {
                summary.fetched += 1;
                if fetched.id == user.id && fetched.matches(payload) {
                    summary.matched += 1;
                    console.pass(format!("User {} matches submitted data", user.id));
                } else {
                    console.fail(format!("User {} differs from submitted data", user.id));
                }
            }
            self.pause().await;
        }
    }

    async fn update_phase(&self, created: &[(UserPayload, UserRecord)], summary: &mut SuiteSummary) {
        let console = self.exerciser.console();
        console.banner("UPDATE TESTS");

        let mut updated = Vec::new();
        for (_, user) in created {
            let payload = updated_payload(user);
            if let Some(user) = self.exerciser.update_user(user.id, &payload).await {
                updated.push(user);
            }
            self.pause().await;
        }
        summary.updated = updated.len();

        console.info("\nVerifying updates...");
        for user in &updated {
            match self.exerciser.get_user(user.id).await {
                Lookup::Found(current) if has_update_prefix(&current.name) => {
                    summary.verified += 1;
                    console.pass(format!("User {} update verified", user.id));
                }
                Lookup::Found(current) => {
                    console.fail(format!(
                        "User {} update not applied, name is '{}'",
                        user.id, current.name
                    ));
                }
                Lookup::NotFound | Lookup::Failed => {
                    console.fail(format!("User {} update could not be verified", user.id));
                }
            }
            self.pause().await;
        }
    }

    /// Deletes the users at even positions, then re-counts and re-reads them.
    async fn delete_phase(&self, created: &[(UserPayload, UserRecord)], summary: &mut SuiteSummary) {
        let console = self.exerciser.console();
        console.banner("DELETE TESTS");

        let mut deleted = Vec::new();
        for (_, user) in created.iter().step_by(2) {
            if self.exerciser.delete_user(user.id).await {
                deleted.push(user.id);
            }
            self.pause().await;
        }
        summary.deleted = deleted.len();

        let remaining = self.exerciser.list_users().await;
        summary.remaining = remaining.len();
        console.info(format!("After deletion, {} users remain", remaining.len()));
        console.info(format!(
            "User count went from {} to {} ({} deletions performed)",
            summary.listed_after_create,
            remaining.len(),
            deleted.len()
        ));

        console.info("\nVerifying deletions...");
        for id in deleted {
            match self.exerciser.get_user(id).await {
                Lookup::NotFound => {
                    summary.confirmed_deleted += 1;
                    console.pass(format!("User {} deletion verified", id));
                }
                Lookup::Found(_) => {
                    console.fail(format!("User {} still present after deletion", id));
                }
                Lookup::Failed => {
                    console.fail(format!("User {} deletion could not be verified", id));
                }
            }
            self.pause().await;
        }
    }

    /// Get, update and delete against an id that should not exist.
    async fn probe_phase(&self, summary: &mut SuiteSummary) {
        self.exerciser.console().banner("ERROR CASE TESTS");
        let missing = self.config.missing_id;

        if !matches!(self.exerciser.get_user(missing).await, Lookup::Found(_)) {
            summary.rejected_probes += 1;
        }
        if self
            .exerciser
            .update_user(missing, &missing_user_payload())
            .await
            .is_none()
        {
            summary.rejected_probes += 1;
        }
        if !self.exerciser.delete_user(missing).await {
            summary.rejected_probes += 1;
        }
    }
}
