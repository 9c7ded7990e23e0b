use crate::config::TrackerConfig;
use crate::domain::{coerce_number, validate_all, ProjectId, Validatable};
use crate::error::Result;
use crate::state::ProjectState;
use crate::ui::component::{mount, query_required, Component};
use crate::ui::surface::{Alert, DomEvent, EventKind, InsertPosition, NodeId, Surface};
use log::{debug, error};
use std::rc::{Rc, Weak};

/// Validated form contents ready to become a project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub people: i64,
}

/// The new-project form
pub struct ProjectInput {
    state: Rc<ProjectState>,
    surface: Rc<dyn Surface>,
    alert: Rc<dyn Alert>,
    alert_message: String,
    element: NodeId,
    title_input: NodeId,
    description_input: NodeId,
    people_input: NodeId,
    this: Weak<ProjectInput>,
}

impl ProjectInput {
    /// Mounts the form at the start of the host element
    pub fn new(
        state: Rc<ProjectState>,
        surface: Rc<dyn Surface>,
        alert: Rc<dyn Alert>,
        config: &TrackerConfig,
    ) -> Result<Rc<Self>> {
        let mounted = mount(
            surface.as_ref(),
            &config.input_template_id,
            &config.host_id,
            InsertPosition::AtStart,
            Some(config.form_id.as_str()),
        )?;
        let lookup = |id: &str| query_required(surface.as_ref(), mounted.element, &format!("#{}", id));
        let title_input = lookup(&config.inputs.title)?;
        let description_input = lookup(&config.inputs.description)?;
        let people_input = lookup(&config.inputs.people)?;

        let input = Rc::new_cyclic(|this| Self {
            state,
            surface,
            alert,
            alert_message: config.alert_message.clone(),
            element: mounted.element,
            title_input,
            description_input,
            people_input,
            this: this.clone(),
        });
        input.configure()?;
        Ok(input)
    }

    /// Validates the form and adds the project.
    ///
    /// On invalid input the user is alerted and `Ok(None)` is returned with the
    /// fields left as typed. On success the fields are cleared.
    pub fn submit(&self) -> Result<Option<ProjectId>> {
        let Some(draft) = self.gather_user_input()? else {
            debug!("rejected project submission");
            self.alert.alert(&self.alert_message);
            return Ok(None);
        };

        let id = self
            .state
            .add_project(draft.title, draft.description, draft.people);
        self.clear_inputs()?;
        Ok(Some(id))
    }

    /// Reads the three fields, returning a draft only when all of them are valid
    pub fn gather_user_input(&self) -> Result<Option<ProjectDraft>> {
        let title = self.surface.value(self.title_input)?;
        let description = self.surface.value(self.description_input)?;
        let people = coerce_number(&self.surface.value(self.people_input)?);

        let checks = [
            Validatable::text(title.as_str()).required().min_length(5),
            Validatable::text(description.as_str()).required(),
            Validatable::number(people).required().min(1.0),
        ];
        // Infinite or huge counts would saturate when stored as i64
        let representable = people.is_finite() && people < i64::MAX as f64;
        if !representable || !validate_all(&checks) {
            return Ok(None);
        }

        Ok(Some(ProjectDraft {
            title,
            description,
            // Fractional counts are truncated
            people: people.trunc() as i64,
        }))
    }

    fn clear_inputs(&self) -> Result<()> {
        for input in [self.title_input, self.description_input, self.people_input] {
            self.surface.set_value(input, "")?;
        }
        Ok(())
    }
}

impl Component for ProjectInput {
    fn configure(&self) -> Result<()> {
        let this = self.this.clone();
        self.surface.add_listener(
            self.element,
            EventKind::Submit,
            Rc::new(move |event: &mut DomEvent<'_>| {
                event.prevent_default();
                let Some(input) = this.upgrade() else {
                    return;
                };
                if let Err(err) = input.submit() {
                    error!("project submission failed: {}", err);
                }
            }),
        )
    }

    fn render_content(&self) -> Result<()> {
        Ok(())
    }

    fn element(&self) -> NodeId {
        self.element
    }
}
