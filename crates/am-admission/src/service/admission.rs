//! Admit and release.

use shared_crypto::Ed25519PublicKey;
use tracing::{debug, info};
use uuid::Uuid;

use super::core::AdmissionService;
use super::types::{AdmissionRequest, AdmissionTicket};
use crate::domain::{AdmissionError, Identity, PuzzleError, ReputationError};
use crate::metrics;

impl AdmissionService {
    /// Run a candidate through every gate.
    ///
    /// Gates run in order: puzzle, registration, connection quota, subnet
    /// cap. A later failure never leaves a connection counted. A registration
    /// made on the way stays, so a retry from a new address keeps its score.
    ///
    /// # Errors
    ///
    /// The first gate that refuses, as an [`AdmissionError`]; branch on
    /// [`AdmissionError::kind`].
    pub fn admit(&self, request: &AdmissionRequest) -> Result<AdmissionTicket, AdmissionError> {
        metrics::record_admission_attempt();

        match self.admit_inner(request) {
            Ok(ticket) => {
                info!(
                    identity = %ticket.identity,
                    address = %ticket.address,
                    tier = %ticket.tier,
                    ticket = %ticket.id,
                    "peer admitted"
                );
                Ok(ticket)
            }
            Err(err) => {
                let kind = err.kind();
                debug!(
                    address = %request.address,
                    reason = kind.as_str(),
                    error = %err,
                    "admission refused"
                );
                metrics::record_admission_rejected(kind.as_str());
                Err(err)
            }
        }
    }

    fn admit_inner(&self, request: &AdmissionRequest) -> Result<AdmissionTicket, AdmissionError> {
        if self.config.puzzle.require_signature && !request.solution.is_signed() {
            return Err(AdmissionError::UnsignedSolution);
        }

        self.puzzle.verify(&request.solution, &request.public_key)?;

        let public_key =
            Ed25519PublicKey::from_slice(&request.public_key).map_err(PuzzleError::MalformedInput)?;
        let identity = Identity::from_public_key(&public_key);

        match self.reputation.register(identity) {
            Ok(()) | Err(ReputationError::AlreadyRegistered(_)) => {}
            Err(err) => return Err(err.into()),
        }

        let mut connections = self.connections.lock();
        let current = connections.count(&identity);
        if !self.reputation.can_open_connection(identity, current)? {
            let tier = self.reputation.tier(identity)?;
            return Err(AdmissionError::ConnectionQuotaExceeded {
                identity,
                tier,
                current,
                limit: tier.connection_quota(),
            });
        }

        self.diversity.add_connection(request.address.ip())?;

        let tier = match self.reputation.tier(identity) {
            Ok(tier) => tier,
            Err(err) => {
                // evicted concurrently
                self.diversity.remove_connection(request.address.ip());
                return Err(err.into());
            }
        };

        let id = Uuid::new_v4();
        *connections.per_identity.entry(identity).or_insert(0) += 1;
        connections.tickets.insert(id, (identity, request.address));

        Ok(AdmissionTicket {
            id,
            identity,
            address: request.address,
            tier,
        })
    }

    /// Close an admitted connection.
    ///
    /// Counters are decremented for the identity and address recorded when
    /// the ticket was issued, whatever the caller's copy now holds.
    ///
    /// # Errors
    ///
    /// `UnknownConnection` if the ticket was already released or was never
    /// issued by this service.
    pub fn release(&self, ticket: &AdmissionTicket) -> Result<(), AdmissionError> {
        let mut connections = self.connections.lock();
        let Some((identity, address)) = connections.tickets.remove(&ticket.id) else {
            debug!(ticket = %ticket.id, address = %ticket.address, "release for unknown ticket");
            return Err(AdmissionError::UnknownConnection(ticket.address));
        };

        if let Some(count) = connections.per_identity.get_mut(&identity) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                connections.per_identity.remove(&identity);
            }
        }
        self.diversity.remove_connection(address.ip());

        debug!(%identity, %address, ticket = %ticket.id, "connection released");
        Ok(())
    }
}
