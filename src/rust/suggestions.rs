//! Static project suggestions keyed by component keyword.
//!
//! The table is compiled into the binary and never mutated. Lookups match a
//! detected component name against every keyword in both directions, so
//! `"RGB LED"` hits `led` and `"sensor"` hits `sensor`.

use std::collections::{HashMap, HashSet};
use std::fmt;

use lazy_static::lazy_static;
use serde::Serialize;

/// Maximum number of suggestions returned by [`suggest_projects`].
pub const MAX_SUGGESTIONS: usize = 6;

/// How demanding a project is. Ordering is `Beginner < Intermediate < Advanced`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A curated project idea for a set of components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSuggestion {
    /// Unique across the whole table
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub components: &'static [&'static str],
    pub icon: &'static str,
}

/// One keyword of the table and the projects listed under it.
#[derive(Debug)]
pub struct ComponentMapping {
    /// Lowercase keyword
    pub keyword: &'static str,
    pub projects: &'static [ProjectSuggestion],
}

const fn project(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    components: &'static [&'static str],
    icon: &'static str,
) -> ProjectSuggestion {
    ProjectSuggestion { id, title, description, difficulty, components, icon }
}

use Difficulty::{Advanced, Beginner, Intermediate};

/// The component table, in keyword order.
pub static COMPONENT_PROJECTS: &[ComponentMapping] = &[
    ComponentMapping {
        keyword: "resistor",
        projects: &[
            project(
                "voltage-divider",
                "Voltage Divider Circuit",
                "Create a simple voltage divider to step down voltage levels for sensors or microcontrollers.",
                Beginner,
                &["resistor", "power supply"],
                "⚡",
            ),
            project(
                "led-current-limiter",
                "LED Current Limiter",
                "Use resistors to safely limit current to LEDs and prevent burnout.",
                Beginner,
                &["resistor", "LED"],
                "💡",
            ),
            project(
                "pull-up-circuit",
                "Pull-up/Pull-down Circuit",
                "Implement pull-up or pull-down resistors for stable digital inputs.",
                Beginner,
                &["resistor", "microcontroller"],
                "🔌",
            ),
        ],
    },
    ComponentMapping {
        keyword: "led",
        projects: &[
            project(
                "blinking-led",
                "Blinking LED Circuit",
                "Build a classic 555 timer-based blinking LED or use a microcontroller.",
                Beginner,
                &["LED", "resistor", "555 timer"],
                "✨",
            ),
            project(
                "rgb-mood-light",
                "RGB Mood Light",
                "Create a color-changing mood lamp using RGB LEDs and PWM control.",
                Intermediate,
                &["RGB LED", "microcontroller", "resistors"],
                "🌈",
            ),
            project(
                "led-matrix",
                "LED Matrix Display",
                "Build a scrolling text display using an 8x8 LED matrix.",
                Intermediate,
                &["LED matrix", "shift register", "microcontroller"],
                "📟",
            ),
        ],
    },
    ComponentMapping {
        keyword: "capacitor",
        projects: &[
            project(
                "power-supply-filter",
                "Power Supply Filter",
                "Add smoothing capacitors to reduce noise in DC power supplies.",
                Beginner,
                &["capacitor", "rectifier", "transformer"],
                "🔋",
            ),
            project(
                "touch-sensor",
                "Capacitive Touch Sensor",
                "Create a touch-sensitive button using capacitive sensing.",
                Intermediate,
                &["capacitor", "resistor", "microcontroller"],
                "👆",
            ),
            project(
                "rc-oscillator",
                "RC Oscillator",
                "Build a simple oscillator circuit for generating square waves.",
                Intermediate,
                &["capacitor", "resistor", "op-amp"],
                "〰️",
            ),
        ],
    },
    ComponentMapping {
        keyword: "transistor",
        projects: &[
            project(
                "motor-driver",
                "Simple Motor Driver",
                "Use transistors to control DC motors from microcontroller outputs.",
                Beginner,
                &["transistor", "diode", "motor"],
                "⚙️",
            ),
            project(
                "audio-amplifier",
                "Audio Amplifier",
                "Build a basic audio amplifier for speakers or headphones.",
                Intermediate,
                &["transistor", "capacitor", "resistor"],
                "🔊",
            ),
            project(
                "h-bridge",
                "H-Bridge Motor Controller",
                "Create a bidirectional motor controller for robotics projects.",
                Advanced,
                &["transistors", "diodes", "microcontroller"],
                "🤖",
            ),
        ],
    },
    ComponentMapping {
        keyword: "arduino",
        projects: &[
            project(
                "weather-station",
                "Weather Station",
                "Build a complete weather monitoring system with temperature, humidity, and pressure sensors.",
                Intermediate,
                &["Arduino", "sensors", "display"],
                "🌡️",
            ),
            project(
                "robot-car",
                "Robot Car",
                "Create an obstacle-avoiding robot car with ultrasonic sensors.",
                Intermediate,
                &["Arduino", "motors", "ultrasonic sensor"],
                "🚗",
            ),
            project(
                "home-automation",
                "Home Automation Hub",
                "Control lights and appliances remotely with relays and WiFi.",
                Advanced,
                &["Arduino", "relays", "WiFi module"],
                "🏠",
            ),
        ],
    },
    ComponentMapping {
        keyword: "sensor",
        projects: &[
            project(
                "light-sensor",
                "Automatic Light Controller",
                "Build a light that turns on automatically when it gets dark.",
                Beginner,
                &["LDR sensor", "relay", "LED"],
                "🌙",
            ),
            project(
                "motion-alarm",
                "Motion Detection Alarm",
                "Create a security system using PIR motion sensors.",
                Beginner,
                &["PIR sensor", "buzzer", "LED"],
                "🚨",
            ),
            project(
                "plant-monitor",
                "Smart Plant Monitor",
                "Monitor soil moisture and light levels for your plants.",
                Intermediate,
                &["moisture sensor", "light sensor", "display"],
                "🌱",
            ),
        ],
    },
    ComponentMapping {
        keyword: "motor",
        projects: &[
            project(
                "servo-arm",
                "Robotic Arm",
                "Build a controllable robotic arm using servo motors.",
                Intermediate,
                &["servo motors", "potentiometers", "microcontroller"],
                "🦾",
            ),
            project(
                "fan-controller",
                "Temperature-Controlled Fan",
                "Create a fan that adjusts speed based on temperature.",
                Beginner,
                &["DC motor", "temperature sensor", "transistor"],
                "🌀",
            ),
        ],
    },
    ComponentMapping {
        keyword: "battery",
        projects: &[
            project(
                "solar-charger",
                "Solar Battery Charger",
                "Build a solar-powered battery charging station.",
                Intermediate,
                &["solar panel", "charge controller", "battery"],
                "☀️",
            ),
            project(
                "power-bank",
                "DIY Power Bank",
                "Create your own portable USB power bank.",
                Beginner,
                &["batteries", "charging module", "USB port"],
                "🔌",
            ),
        ],
    },
    ComponentMapping {
        keyword: "display",
        projects: &[
            project(
                "digital-clock",
                "Digital Clock",
                "Build a digital clock with alarm functionality.",
                Intermediate,
                &["display", "RTC module", "microcontroller"],
                "⏰",
            ),
            project(
                "score-counter",
                "Game Score Counter",
                "Create a score display for tabletop games.",
                Beginner,
                &["7-segment display", "buttons", "microcontroller"],
                "🎮",
            ),
        ],
    },
    ComponentMapping {
        keyword: "microcontroller",
        projects: &[
            project(
                "iot-sensor-node",
                "IoT Sensor Node",
                "Build a wireless sensor node for home monitoring.",
                Advanced,
                &["ESP32", "sensors", "battery"],
                "📡",
            ),
            project(
                "midi-controller",
                "MIDI Controller",
                "Create a custom MIDI controller for music production.",
                Intermediate,
                &["Arduino", "potentiometers", "buttons"],
                "🎹",
            ),
        ],
    },
];

lazy_static! {
    static ref PROJECT_INDEX: HashMap<&'static str, &'static ProjectSuggestion> = COMPONENT_PROJECTS
        .iter()
        .flat_map(|mapping| mapping.projects.iter())
        .map(|project| (project.id, project))
        .collect();
}

/// Returns the keywords of the table in their declared order.
pub fn keywords() -> impl Iterator<Item = &'static str> {
    COMPONENT_PROJECTS.iter().map(|mapping| mapping.keyword)
}

/// Looks up a single suggestion by its id.
pub fn find_project(id: &str) -> Option<&'static ProjectSuggestion> {
    PROJECT_INDEX.get(id).copied()
}

/// Collects project suggestions for the detected component names.
///
/// Each name is lowercased and matched against every keyword: a keyword matches
/// when either string contains the other. Suggestions are added in table order,
/// skipping ids that were already collected. The result is stably sorted by
/// difficulty, beginner first, and truncated to [`MAX_SUGGESTIONS`].
///
/// # Example
/// ```
/// use component_detector::suggestions::{suggest_projects, Difficulty};
///
/// let projects = suggest_projects(&["Resistor"]);
/// assert_eq!(projects.len(), 3);
/// assert!(projects.iter().all(|p| p.difficulty == Difficulty::Beginner));
/// ```
pub fn suggest_projects<S: AsRef<str>>(detected: &[S]) -> Vec<&'static ProjectSuggestion> {
    let mut projects: Vec<&'static ProjectSuggestion> = Vec::new();
    let mut added_ids: HashSet<&'static str> = HashSet::new();

    for component in detected {
        let lower = component.as_ref().to_lowercase();

        for mapping in COMPONENT_PROJECTS {
            if !(lower.contains(mapping.keyword) || mapping.keyword.contains(lower.as_str())) {
                continue;
            }
            for project in mapping.projects {
                if added_ids.insert(project.id) {
                    projects.push(project);
                }
            }
        }
    }

    // sort_by_key is stable, so table order survives within a difficulty
    projects.sort_by_key(|project| project.difficulty);
    projects.truncate(MAX_SUGGESTIONS);
    projects
}
