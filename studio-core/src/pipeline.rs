//! The contact submission pipeline: validate, store, then notify.
//!
//! ```text
//! Received ──invalid──────────────▶ Rejected   (no side effects)
//!    │
//!    ▼ valid
//! Validated ──store fails─────────▶ Failed     (nothing to notify about)
//!    │
//!    ▼ stored
//! Stored ──notify ok / notify fails▶ Accepted  (record is never rolled back)
//! ```
//!
//! The store write always completes before the notification is attempted,
//! so an operator is never told about an inquiry that was not recorded.
//!
//! An optional deadline covers both steps. Running out of time before the
//! record is written is a failure. Running out while notifying only marks
//! the notification as failed, since the inquiry is already safe.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info};

use crate::db::repository::{InquiryRepository, RepositoryError};
use crate::models::{ContactInquiry, ContactPayload, InquiryForm, NewContactInquiry};
use crate::notify::{NotificationError, NotificationMessage, Notifier};
use crate::validation::ValidationErrors;
use crate::validation::contact::validate_contact;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    Sent,
    /// The inquiry is stored but the operator was not told about it.
    Failed(NotificationError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedSubmission {
    pub inquiry: ContactInquiry,
    pub notification: NotificationStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionFailure {
    Storage(RepositoryError),
    TimedOut(Duration),
}

/// The only three results a submission can have.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Accepted(AcceptedSubmission),
    Rejected(ValidationErrors),
    Failed(SubmissionFailure),
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

pub struct ContactPipeline {
    repository: Arc<dyn InquiryRepository>,
    notifier: Arc<dyn Notifier>,
    operator: String,
    timeout: Option<Duration>,
}

impl ContactPipeline {
    pub fn new(
        repository: Arc<dyn InquiryRepository>,
        notifier: Arc<dyn Notifier>,
        operator: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            notifier,
            operator: operator.into(),
            timeout: None,
        }
    }

    /// Bounds the store-then-notify part of a submission. Exceeding it
    /// before the inquiry is stored yields [`SubmissionFailure::TimedOut`].
    /// Exceeding it while notifying yields an accepted submission whose
    /// notification failed.
    pub fn with_timeout(
        mut self,
        timeout: Duration,
    ) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub async fn submit(
        &self,
        form: InquiryForm,
        payload: &ContactPayload,
    ) -> SubmissionOutcome {
        let inquiry = match validate_contact(form, payload) {
            Ok(inquiry) => inquiry,
            Err(errors) => {
                debug!(form = form.as_str(), %errors, "contact submission rejected");
                return SubmissionOutcome::Rejected(errors);
            }
        };

        self.store_and_notify(inquiry).await
    }

    async fn store_and_notify(
        &self,
        inquiry: NewContactInquiry,
    ) -> SubmissionOutcome {
        let deadline = self.timeout.map(|limit| (Instant::now() + limit, limit));

        let stored = match within(deadline, self.repository.create_inquiry(inquiry)).await {
            Ok(Ok(stored)) => stored,
            Ok(Err(e)) => {
                error!(error = %e, "failed to store contact inquiry");
                return SubmissionOutcome::Failed(SubmissionFailure::Storage(e));
            }
            Err(limit) => {
                error!(?limit, "contact submission timed out before it was stored");
                return SubmissionOutcome::Failed(SubmissionFailure::TimedOut(limit));
            }
        };
        info!(
            inquiry_id = stored.id,
            form = stored.form.as_str(),
            "contact inquiry stored"
        );

        let message = NotificationMessage::for_inquiry(&stored, &self.operator);
        let sent = match within(deadline, self.notifier.send(&message)).await {
            Ok(result) => result,
            Err(limit) => Err(NotificationError::Transport(format!(
                "notification timed out after {limit:?}"
            ))),
        };
        let notification = match sent {
            Ok(()) => {
                debug!(
                    inquiry_id = stored.id,
                    transport = self.notifier.transport_name(),
                    "operator notified"
                );
                NotificationStatus::Sent
            }
            Err(e) => {
                error!(
                    inquiry_id = stored.id,
                    transport = self.notifier.transport_name(),
                    error = %e,
                    "operator notification failed; inquiry remains stored"
                );
                NotificationStatus::Failed(e)
            }
        };

        SubmissionOutcome::Accepted(AcceptedSubmission {
            inquiry: stored,
            notification,
        })
    }
}

/// Runs `step` until `deadline`, or returns the submission's time limit.
async fn within<F: Future>(
    deadline: Option<(Instant, Duration)>,
    step: F,
) -> Result<F::Output, Duration> {
    match deadline {
        Some((at, limit)) => tokio::time::timeout_at(at, step).await.map_err(|_| limit),
        None => Ok(step.await),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{NewPhoneLead, PhoneLead, ProjectType};

    // ── stub repository ──────────────────────────────────────────────────
    #[derive(Default)]
    struct RecordingRepository {
        records: Mutex<Vec<ContactInquiry>>,
        next_id: AtomicI64,
        fail_with: Option<RepositoryError>,
        delay: Option<Duration>,
    }

    impl RecordingRepository {
        fn failing(error: RepositoryError) -> Self {
            Self {
                fail_with: Some(error),
                ..Default::default()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Default::default()
            }
        }

        fn records(&self) -> Vec<ContactInquiry> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InquiryRepository for RecordingRepository {
        async fn create_inquiry(
            &self,
            inquiry: NewContactInquiry,
        ) -> Result<ContactInquiry, RepositoryError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }
            let stored = ContactInquiry {
                id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
                form: inquiry.form,
                name: inquiry.name,
                email: inquiry.email,
                message: inquiry.message,
                phone: inquiry.phone,
                project_type: inquiry.project_type,
                budget: inquiry.budget,
                timeline: inquiry.timeline,
                submitted_at: Utc::now(),
            };
            self.records.lock().unwrap().push(stored.clone());
            Ok(stored)
        }
        async fn get_inquiry(&self, id: i64) -> Result<ContactInquiry, RepositoryError> {
            self.records()
                .into_iter()
                .find(|r| r.id == id)
                .ok_or(RepositoryError::NotFound)
        }
        async fn list_inquiries(
            &self,
            _since: Option<DateTime<Utc>>,
        ) -> Result<Vec<ContactInquiry>, RepositoryError> {
            Ok(self.records())
        }
        async fn create_phone_lead(
            &self,
            _lead: NewPhoneLead,
        ) -> Result<PhoneLead, RepositoryError> {
            Err(RepositoryError::Database("not used".to_string()))
        }
        async fn list_phone_leads(
            &self,
            _since: Option<DateTime<Utc>>,
        ) -> Result<Vec<PhoneLead>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    // ── stub notifier ────────────────────────────────────────────────────
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<NotificationMessage>>,
        fail: bool,
        delay: Option<Duration>,
    }

    impl RecordingNotifier {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Default::default()
            }
        }

        fn sent(&self) -> Vec<NotificationMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        fn transport_name(&self) -> &'static str {
            "recording"
        }

        async fn send(
            &self,
            message: &NotificationMessage,
        ) -> Result<(), NotificationError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.sent.lock().unwrap().push(message.clone());
            if self.fail {
                Err(NotificationError::Transport("connection refused".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn pipeline(
        repository: &Arc<RecordingRepository>,
        notifier: &Arc<RecordingNotifier>,
    ) -> ContactPipeline {
        ContactPipeline::new(repository.clone(), notifier.clone(), "inbox@studio.test")
    }

    fn valid_payload() -> ContactPayload {
        ContactPayload {
            name: Some("Asha Rao".to_string()),
            email: Some("asha@example.in".to_string()),
            message: Some("We are planning a duplex.".to_string()),
            project_type: Some("residential".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn valid_submission_is_stored_then_notified() {
        let repository = Arc::new(RecordingRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let outcome = pipeline(&repository, &notifier)
            .submit(InquiryForm::Project, &valid_payload())
            .await;

        let SubmissionOutcome::Accepted(accepted) = outcome else {
            panic!("expected Accepted, got {outcome:#?}");
        };
        assert_eq!(accepted.notification, NotificationStatus::Sent);
        assert_eq!(accepted.inquiry.project_type, Some(ProjectType::Residential));
        assert_eq!(repository.records().len(), 1);

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "inbox@studio.test");
        assert!(sent[0].text.contains("Asha Rao"));
        assert!(sent[0].text.contains("asha@example.in"));
        assert!(sent[0].text.contains("We are planning a duplex."));
    }

    #[tokio::test]
    async fn missing_email_is_rejected_without_side_effects() {
        let repository = Arc::new(RecordingRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let payload = ContactPayload {
            email: None,
            ..valid_payload()
        };

        let outcome = pipeline(&repository, &notifier)
            .submit(InquiryForm::Quick, &payload)
            .await;

        let SubmissionOutcome::Rejected(errors) = outcome else {
            panic!("expected Rejected, got {outcome:#?}");
        };
        assert!(errors.contains("email"));
        assert!(repository.records().is_empty());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn project_form_without_type_is_rejected() {
        let repository = Arc::new(RecordingRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let payload = ContactPayload {
            project_type: None,
            ..valid_payload()
        };

        let outcome = pipeline(&repository, &notifier)
            .submit(InquiryForm::Project, &payload)
            .await;

        assert!(outcome.is_rejected());
        assert!(repository.records().is_empty());
    }

    #[tokio::test]
    async fn storage_failure_skips_notification() {
        let repository = Arc::new(RecordingRepository::failing(RepositoryError::Connection(
            "database is locked".to_string(),
        )));
        let notifier = Arc::new(RecordingNotifier::default());

        let outcome = pipeline(&repository, &notifier)
            .submit(InquiryForm::Quick, &valid_payload())
            .await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Failed(SubmissionFailure::Storage(RepositoryError::Connection(
                "database is locked".to_string()
            )))
        );
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn notification_failure_still_accepts_and_keeps_record() {
        let repository = Arc::new(RecordingRepository::default());
        let notifier = Arc::new(RecordingNotifier::failing());

        let outcome = pipeline(&repository, &notifier)
            .submit(InquiryForm::Quick, &valid_payload())
            .await;

        let SubmissionOutcome::Accepted(accepted) = outcome else {
            panic!("expected Accepted, got {outcome:#?}");
        };
        assert_eq!(
            accepted.notification,
            NotificationStatus::Failed(NotificationError::Transport(
                "connection refused".to_string()
            ))
        );
        assert_eq!(repository.records().len(), 1);
        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_submissions_are_stored_independently() {
        let repository = Arc::new(RecordingRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let pipeline = pipeline(&repository, &notifier);

        let first = pipeline.submit(InquiryForm::Quick, &valid_payload()).await;
        let second = pipeline.submit(InquiryForm::Quick, &valid_payload()).await;

        assert!(first.is_accepted());
        assert!(second.is_accepted());
        let records = repository.records();
        assert_eq!(records.len(), 2);
        assert_ne!(records[0].id, records[1].id);
        assert_eq!(notifier.sent().len(), 2);
    }

    #[tokio::test]
    async fn slow_store_times_out_as_failed() {
        let repository = Arc::new(RecordingRepository::slow(Duration::from_secs(5)));
        let notifier = Arc::new(RecordingNotifier::default());

        let outcome = pipeline(&repository, &notifier)
            .with_timeout(Duration::from_millis(20))
            .submit(InquiryForm::Quick, &valid_payload())
            .await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Failed(SubmissionFailure::TimedOut(Duration::from_millis(20)))
        );
        assert!(repository.records().is_empty());
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn slow_notification_after_store_is_still_accepted() {
        let repository = Arc::new(RecordingRepository::default());
        let notifier = Arc::new(RecordingNotifier::slow(Duration::from_secs(5)));

        let outcome = pipeline(&repository, &notifier)
            .with_timeout(Duration::from_millis(20))
            .submit(InquiryForm::Quick, &valid_payload())
            .await;

        let SubmissionOutcome::Accepted(accepted) = outcome else {
            panic!("expected Accepted, got {outcome:#?}");
        };
        assert_eq!(
            accepted.notification,
            NotificationStatus::Failed(NotificationError::Transport(
                "notification timed out after 20ms".to_string()
            ))
        );
        assert_eq!(repository.records().len(), 1);
        assert!(notifier.sent().is_empty());
    }

    #[tokio::test]
    async fn fast_pipeline_is_unaffected_by_timeout() {
        let repository = Arc::new(RecordingRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let outcome = pipeline(&repository, &notifier)
            .with_timeout(Duration::from_secs(5))
            .submit(InquiryForm::Quick, &valid_payload())
            .await;

        assert!(outcome.is_accepted());
    }
}
