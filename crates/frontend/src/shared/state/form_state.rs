use contracts::shared::FieldErrors;

/// New value for one form field, as delivered by an input element.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

/// Editable copy of an entity, keyed by wire field names.
pub trait Draft: Clone {
    type Payload;

    /// Fields that cannot change once the entity exists.
    const IDENTITY_FIELDS: &'static [&'static str] = &[];

    /// Applies one edit. Unknown fields and mismatched values are ignored.
    fn set(&mut self, field: &str, value: FieldValue);

    /// Trimmed, typed payload, or one message per offending field.
    fn validate(&self) -> Result<Self::Payload, FieldErrors>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A submission is already in flight.
    Busy,
    /// Client-side validation failed; errors are in the form.
    Invalid,
}

/// Which form, if any, a list screen has open.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormSlot<T> {
    #[default]
    Closed,
    Create,
    Edit(T),
}

impl<T> FormSlot<T> {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormSlot::Closed)
    }

    pub fn entity(&self) -> Option<&T> {
        match self {
            FormSlot::Edit(entity) => Some(entity),
            _ => None,
        }
    }
}

/// Draft plus error map for one open form.
///
/// `editing -> submitting -> (closed | editing)`. Closing is the owner's
/// job: the state is simply dropped, along with draft and errors.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState<D: Draft> {
    mode: FormMode,
    draft: D,
    errors: FieldErrors,
    phase: FormPhase,
}

impl<D: Draft> FormState<D> {
    pub fn new(mode: FormMode, draft: D) -> Self {
        Self {
            mode,
            draft,
            errors: FieldErrors::new(),
            phase: FormPhase::Editing,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn is_locked(&self, field: &str) -> bool {
        self.is_edit() && D::IDENTITY_FIELDS.contains(&field)
    }

    /// Updates the draft and clears that field's error. Locked fields keep
    /// their value; returns whether the edit was applied.
    pub fn change(&mut self, field: &str, value: FieldValue) -> bool {
        if self.is_locked(field) {
            return false;
        }
        self.draft.set(field, value);
        self.errors.clear_field(field);
        true
    }

    /// Validates and enters `Submitting` on success.
    pub fn begin_submit(&mut self) -> Result<D::Payload, SubmitBlocked> {
        if self.is_submitting() {
            return Err(SubmitBlocked::Busy);
        }
        match self.draft.validate() {
            Ok(payload) => {
                self.errors = FieldErrors::new();
                self.phase = FormPhase::Submitting;
                Ok(payload)
            }
            Err(errors) => {
                self.errors = errors;
                Err(SubmitBlocked::Invalid)
            }
        }
    }

    /// Server answered with field-keyed errors.
    pub fn reject(&mut self, errors: FieldErrors) {
        self.errors.merge(errors);
        self.phase = FormPhase::Editing;
    }

    /// Submission failed without usable detail; draft stays as typed.
    pub fn fail(&mut self) {
        self.phase = FormPhase::Editing;
    }
}
