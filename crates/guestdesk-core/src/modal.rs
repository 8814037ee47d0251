//! Modal workflow state machine.
//!
//! One [`ModalState`] value per page models every dialog the page can
//! show. Exactly one modal exists at a time and transitions are
//! single-step, so "two modals open" is unrepresentable. Submit gates the
//! mutation behind synchronous validation: an invalid form keeps the
//! modal open and issues no network call at all.

use crate::validate::FieldErrors;

/// What a page does when a mutation fails while its modal is open.
///
/// The per-call-site choice is deliberate; the default keeps the
/// operator's draft on screen so nothing typed is lost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MutationErrorPolicy {
    #[default]
    StayOpen,
    Close,
}

/// Result of [`ModalState::submit`].
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the error map is populated and the modal stays
    /// open. No network call may be made.
    Invalid,
    /// Validation passed (or none applies) — run the mutation, then call
    /// [`ModalState::resolve_mutation`] with the result.
    Submit,
    /// Nothing to submit (modal closed or a read-only detail view).
    Nothing,
}

/// An editable draft with self-contained validation.
pub trait FormDraft {
    /// Validate, storing messages internally. Returns `true` when clean.
    fn validate(&mut self) -> bool;

    /// The current field-error map.
    fn errors(&self) -> &FieldErrors;
}

/// The read-only detail modal and the confirm dialogs carry no form.
impl FormDraft for () {
    fn validate(&mut self) -> bool {
        true
    }

    fn errors(&self) -> &FieldErrors {
        static EMPTY: std::sync::OnceLock<FieldErrors> = std::sync::OnceLock::new();
        EMPTY.get_or_init(FieldErrors::new)
    }
}

/// Finite modal state for one list page.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState<F> {
    #[default]
    Closed,
    /// Read-only detail view of one entity.
    Detail { id: i64 },
    /// Create dialog with a blank draft.
    Add { form: F },
    /// Edit dialog pre-populated from the target entity.
    Edit { id: i64, form: F },
    /// Delete confirmation.
    ConfirmDelete { id: i64 },
    /// Status-transition dialog (orders): pick the next status code.
    UpdateStatus { id: i64, selected: String },
}

impl<F: FormDraft> ModalState<F> {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    pub fn open_detail(&mut self, id: i64) {
        *self = Self::Detail { id };
    }

    pub fn open_add(&mut self, form: F) {
        *self = Self::Add { form };
    }

    pub fn open_edit(&mut self, id: i64, form: F) {
        *self = Self::Edit { id, form };
    }

    pub fn open_delete(&mut self, id: i64) {
        *self = Self::ConfirmDelete { id };
    }

    pub fn open_update_status(&mut self, id: i64, current_code: &str) {
        *self = Self::UpdateStatus {
            id,
            selected: current_code.to_owned(),
        };
    }

    /// Discard the draft and close.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// The active form, when one is open.
    pub fn form_mut(&mut self) -> Option<&mut F> {
        match self {
            Self::Add { form } | Self::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Validate (where a form applies) and report whether the caller may
    /// proceed to the network mutation.
    pub fn submit(&mut self) -> SubmitOutcome {
        match self {
            Self::Add { form } | Self::Edit { form, .. } => {
                if form.validate() {
                    SubmitOutcome::Submit
                } else {
                    SubmitOutcome::Invalid
                }
            }
            Self::ConfirmDelete { .. } | Self::UpdateStatus { .. } => SubmitOutcome::Submit,
            Self::Closed | Self::Detail { .. } => SubmitOutcome::Nothing,
        }
    }

    /// Apply the mutation outcome: success always closes; failure closes
    /// only under [`MutationErrorPolicy::Close`].
    pub fn resolve_mutation(&mut self, success: bool, policy: MutationErrorPolicy) {
        if success || policy == MutationErrorPolicy::Close {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::ProductForm;

    fn invalid_product_form() -> ProductForm {
        ProductForm {
            name: "Towel Set".into(),
            cost: "-5".into(),
            price: "10".into(),
            quantity: "1".into(),
            ..ProductForm::blank()
        }
    }

    fn valid_product_form() -> ProductForm {
        ProductForm {
            name: "Towel Set".into(),
            cost: "4".into(),
            price: "10".into(),
            quantity: "1".into(),
            ..ProductForm::blank()
        }
    }

    #[test]
    fn only_one_modal_at_a_time() {
        let mut modal: ModalState<ProductForm> = ModalState::Closed;
        modal.open_add(ProductForm::blank());
        assert!(matches!(modal, ModalState::Add { .. }));

        modal.open_delete(7);
        assert!(matches!(modal, ModalState::ConfirmDelete { id: 7 }));

        modal.close();
        assert!(!modal.is_open());
    }

    #[test]
    fn invalid_submit_keeps_modal_open_with_errors() {
        let mut modal = ModalState::Closed;
        modal.open_add(invalid_product_form());

        assert_eq!(modal.submit(), SubmitOutcome::Invalid);
        assert!(modal.is_open(), "invalid submit must not close the modal");
        let form = modal.form_mut().expect("form present");
        assert_eq!(form.errors.get("cost"), Some("Valid cost is required"));
    }

    #[test]
    fn valid_submit_then_success_closes() {
        let mut modal = ModalState::Closed;
        modal.open_add(valid_product_form());

        assert_eq!(modal.submit(), SubmitOutcome::Submit);
        modal.resolve_mutation(true, MutationErrorPolicy::StayOpen);
        assert!(!modal.is_open());
    }

    #[test]
    fn mutation_failure_honors_policy() {
        let mut modal = ModalState::Closed;
        modal.open_add(valid_product_form());
        modal.resolve_mutation(false, MutationErrorPolicy::StayOpen);
        assert!(modal.is_open(), "StayOpen keeps the draft on screen");

        modal.resolve_mutation(false, MutationErrorPolicy::Close);
        assert!(!modal.is_open());
    }

    #[test]
    fn detail_modal_has_nothing_to_submit() {
        let mut modal: ModalState<ProductForm> = ModalState::Closed;
        modal.open_detail(3);
        assert_eq!(modal.submit(), SubmitOutcome::Nothing);
    }

    #[test]
    fn status_modal_submits_without_validation() {
        let mut modal: ModalState<()> = ModalState::Closed;
        modal.open_update_status(5, "P");
        assert_eq!(modal.submit(), SubmitOutcome::Submit);
        match &modal {
            ModalState::UpdateStatus { id, selected } => {
                assert_eq!(*id, 5);
                assert_eq!(selected, "P");
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }
}
