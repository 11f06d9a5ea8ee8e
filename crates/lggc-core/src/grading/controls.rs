//! Slider model for the sixteen grading controls.
//!
//! Each control holds the value it contributes to the grade and a default it
//! resets to: neutral for a fresh panel, the loaded grade for a panel built
//! from a preset. The global gamma and gain sliders are offsets around 1, so
//! their slider position is the stored value minus one; every other slider
//! position is the stored value itself. Storing the grade value keeps a loaded
//! preset bit-exact through `to_parameters`.

use std::fmt;
use std::str::FromStr;

use crate::grading::params::{Channel, ChannelParameters, GradeParameters, ParameterKind};

/// Number of controls: four parameters for the global set and each channel.
pub const CONTROL_COUNT: usize = 16;

/// Which parameter set a control writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlGroup {
    Global,
    Channel(Channel),
}

/// A single slider: one parameter in one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Control {
    pub group: ControlGroup,
    pub parameter: ParameterKind,
}

impl Control {
    pub const fn global(parameter: ParameterKind) -> Self {
        Self {
            group: ControlGroup::Global,
            parameter,
        }
    }

    pub const fn channel(channel: Channel, parameter: ParameterKind) -> Self {
        Self {
            group: ControlGroup::Channel(channel),
            parameter,
        }
    }

    /// All controls: global first, then red, green, blue.
    pub fn all() -> impl Iterator<Item = Control> {
        let groups = [
            ControlGroup::Global,
            ControlGroup::Channel(Channel::Red),
            ControlGroup::Channel(Channel::Green),
            ControlGroup::Channel(Channel::Blue),
        ];
        groups.into_iter().flat_map(|group| {
            ParameterKind::all()
                .iter()
                .map(move |&parameter| Control { group, parameter })
        })
    }

    /// Slider identifier, e.g. `gamma` or `liftR`.
    pub fn id(&self) -> String {
        let base = match self.parameter {
            ParameterKind::Lift => "lift",
            ParameterKind::Gamma => "gamma",
            ParameterKind::Gain => "gain",
            ParameterKind::Contrast => "contrast",
        };
        let suffix = match self.group {
            ControlGroup::Global => "",
            ControlGroup::Channel(Channel::Red) => "R",
            ControlGroup::Channel(Channel::Green) => "G",
            ControlGroup::Channel(Channel::Blue) => "B",
        };
        format!("{base}{suffix}")
    }

    /// Whether the slider is an offset around 1 rather than around 0.
    fn is_biased(&self) -> bool {
        self.group == ControlGroup::Global
            && matches!(self.parameter, ParameterKind::Gamma | ParameterKind::Gain)
    }

    fn slot(&self) -> usize {
        let group = match self.group {
            ControlGroup::Global => 0,
            ControlGroup::Channel(channel) => 1 + channel.index(),
        };
        let parameter = match self.parameter {
            ParameterKind::Lift => 0,
            ParameterKind::Gamma => 1,
            ParameterKind::Gain => 2,
            ParameterKind::Contrast => 3,
        };
        group * 4 + parameter
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

/// Error returned when a slider identifier is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown control: {0}")]
pub struct UnknownControl(pub String);

impl FromStr for Control {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Control::all()
            .find(|c| c.id() == s)
            .ok_or_else(|| UnknownControl(s.to_string()))
    }
}

/// Grade values for all sixteen controls.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPanel {
    values: [f32; CONTROL_COUNT],
    defaults: [f32; CONTROL_COUNT],
}

impl ControlPanel {
    /// All sliders at zero, which maps to the neutral grade.
    pub fn new() -> Self {
        let mut values = [0.0; CONTROL_COUNT];
        for control in Control::all().filter(Control::is_biased) {
            values[control.slot()] = 1.0;
        }
        Self {
            values,
            defaults: values,
        }
    }

    /// Current slider position.
    pub fn get(&self, control: Control) -> f32 {
        let value = self.values[control.slot()];
        if control.is_biased() { value - 1.0 } else { value }
    }

    /// Move a slider.
    pub fn set(&mut self, control: Control, position: f32) {
        let value = if control.is_biased() {
            1.0 + position
        } else {
            position
        };
        self.values[control.slot()] = value;
    }

    /// Restore one slider to its default.
    pub fn reset(&mut self, control: Control) {
        let slot = control.slot();
        self.values[slot] = self.defaults[slot];
    }

    /// Restore every slider to its default.
    pub fn reset_all(&mut self) {
        self.values = self.defaults;
    }

    /// Value the control contributes to the grade, including the +1 bias of
    /// the global gamma and gain sliders.
    pub fn effective_value(&self, control: Control) -> f32 {
        self.values[control.slot()]
    }

    /// Label text for a control, e.g. `Gamma = 1.2`.
    pub fn label(&self, control: Control) -> String {
        format!(
            "{} = {}",
            control.parameter.label(),
            self.effective_value(control)
        )
    }

    /// Build the grade described by the current slider positions.
    pub fn to_parameters(&self) -> GradeParameters {
        let mut params = GradeParameters {
            global: ChannelParameters::ZERO,
            ..Default::default()
        };
        for control in Control::all() {
            let value = self.effective_value(control);
            let target = match control.group {
                ControlGroup::Global => &mut params.global,
                ControlGroup::Channel(channel) => params.offsets_mut(channel),
            };
            target.set(control.parameter, value);
        }
        params
    }

    /// Position the sliders so that `to_parameters` reproduces `params` exactly.
    ///
    /// The loaded positions become the defaults that `reset` returns to.
    pub fn from_parameters(params: &GradeParameters) -> Self {
        let mut panel = Self::new();
        for control in Control::all() {
            panel.values[control.slot()] = match control.group {
                ControlGroup::Global => params.global.get(control.parameter),
                ControlGroup::Channel(channel) => params.offsets(channel).get(control.parameter),
            };
        }
        panel.defaults = panel.values;
        panel
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_panel_is_neutral_grade() {
        let params = ControlPanel::new().to_parameters();
        assert_eq!(params, GradeParameters::default());
    }

    #[test]
    fn test_control_ids_round_trip() {
        let ids: Vec<String> = Control::all().map(|c| c.id()).collect();
        assert_eq!(ids.len(), CONTROL_COUNT);
        assert_eq!(ids[0], "lift");
        assert_eq!(ids[5], "gammaR");
        assert_eq!(ids[15], "contrastB");
        for id in &ids {
            let control: Control = id.parse().unwrap();
            assert_eq!(&control.id(), id);
        }
    }

    #[test]
    fn test_unknown_control_is_rejected() {
        let err = "saturation".parse::<Control>().unwrap_err();
        assert_eq!(err, UnknownControl("saturation".to_string()));
    }

    #[test]
    fn test_global_gamma_and_gain_are_biased() {
        let mut panel = ControlPanel::new();
        panel.set(Control::global(ParameterKind::Gamma), 0.5);
        panel.set(Control::global(ParameterKind::Gain), -0.25);
        panel.set(Control::channel(Channel::Red, ParameterKind::Gamma), 0.5);

        let params = panel.to_parameters();
        assert_eq!(params.global.gamma, 1.5);
        assert_eq!(params.global.gain, 0.75);
        assert_eq!(params.red.gamma, 0.5);
        assert_eq!(params.effective(Channel::Red).gamma, 2.0);
    }

    #[test]
    fn test_reset_restores_default() {
        let lift = Control::channel(Channel::Green, ParameterKind::Lift);
        let mut panel = ControlPanel::new();
        panel.set(lift, 0.3);
        panel.set(Control::global(ParameterKind::Contrast), 0.8);
        panel.reset(lift);
        assert_eq!(panel.get(lift), 0.0);
        assert_eq!(panel.get(Control::global(ParameterKind::Contrast)), 0.8);

        panel.reset_all();
        assert_eq!(panel, ControlPanel::new());
    }

    #[test]
    fn test_labels_show_effective_values() {
        let mut panel = ControlPanel::new();
        panel.set(Control::global(ParameterKind::Gamma), 0.5);
        assert_eq!(panel.label(Control::global(ParameterKind::Gamma)), "Gamma = 1.5");
        assert_eq!(panel.label(Control::global(ParameterKind::Lift)), "Lift = 0");
        assert_eq!(
            panel.label(Control::channel(Channel::Blue, ParameterKind::Contrast)),
            "Contrast = 0"
        );
    }

    #[test]
    fn test_from_parameters_inverts_to_parameters() {
        let mut panel = ControlPanel::new();
        panel.set(Control::global(ParameterKind::Gain), 0.5);
        panel.set(Control::channel(Channel::Blue, ParameterKind::Lift), -0.125);
        let params = panel.to_parameters();
        let mut loaded = ControlPanel::from_parameters(&params);
        assert_eq!(loaded.to_parameters(), params);

        // Reset returns to the loaded grade, not to neutral.
        let gain = Control::global(ParameterKind::Gain);
        loaded.set(gain, 2.0);
        loaded.reset(gain);
        assert_eq!(loaded.get(gain), 0.5);
    }

    #[test]
    fn test_loaded_grade_is_bit_exact() {
        let mut params = GradeParameters::default();
        params.global.gamma = 1e-8;
        params.global.gain = 0.001;
        params.red.lift = 0.3;

        let mut panel = ControlPanel::from_parameters(&params);
        let restored = panel.to_parameters();
        assert_eq!(restored.global.gamma.to_bits(), 1e-8_f32.to_bits());
        assert_eq!(restored.global.gain.to_bits(), 0.001_f32.to_bits());
        assert_eq!(restored, params);
        assert!(crate::TransferTables::from_parameters(&restored).is_ok());

        let gamma = Control::global(ParameterKind::Gamma);
        panel.set(gamma, 0.5);
        panel.reset(gamma);
        assert_eq!(panel.effective_value(gamma).to_bits(), 1e-8_f32.to_bits());
    }
}
