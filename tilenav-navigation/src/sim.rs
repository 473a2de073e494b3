//! Curso simulado
//!
//! Monta um [`Robot`] inteiro sobre um [`SimClock`]: dois motores simulados e
//! sensores cujas leituras são derivadas da pose dos motores.
//!
//! ## Modelo
//!
//! ```text
//!   rumo   = (pos_esq - pos_dir) / (2 · razão)      graus, + = horário
//!   avanço = (pos_esq + pos_dir) / 2                graus de roda
//!
//!   chão:      |rumo - rumo_linha| > tolerância  → fora da pista (indeterminado)
//!              senão faixas alternadas de `stripe_deg` graus de avanço
//!              (faixa par = preto, ímpar = branco)
//!
//!   distância: |rumo - azimute| ≤ feixe/2 → alcance(avanço) + espalhamento·|desvio|
//!              senão alcance máximo do sensor
//! ```
//!
//! Todo avanço conta como aproximação do objeto. O modelo não integra posição
//! em duas dimensões.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tilenav_acoustic::{MAX_RANGE_MM, Speaker, UltrasonicSensor};
use tilenav_actuator::{DifferentialDrive, DriveConfig, MotorActuator, MotorConfig, MotorPort};
use tilenav_core::clock::{Clock, SimClock};
use tilenav_core::config::NavConfig;
use tilenav_core::source::SampleSource;
use tilenav_core::traits::DriveMotor;
use tilenav_haptic::TouchSensor;
use tilenav_photonic::ColorSensor;

use crate::error::NavResult;
use crate::robot::Robot;

/// Objeto (torre) no curso
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectPlacement {
    /// Azimute absoluto do objeto (graus, + = horário a partir do rumo inicial)
    pub bearing_deg: f32,
    /// Distância com avanço zero (mm)
    pub range_mm: f32,
    /// Largura do feixe do ultrassom (graus)
    pub beam_deg: f32,
    /// Acréscimo na leitura por grau de desvio do azimute (mm)
    pub spread_mm_per_deg: f32,
}

impl Default for ObjectPlacement {
    fn default() -> Self {
        Self {
            bearing_deg: 0.0,
            range_mm: 600.0,
            beam_deg: 20.0,
            spread_mm_per_deg: 4.0,
        }
    }
}

/// Geometria do curso
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CourseLayout {
    /// Comprimento de cada faixa de cor (graus de roda)
    pub stripe_deg: f32,
    pub black_value: i32,
    pub white_value: i32,
    /// Refletância fora da pista
    pub off_course_value: i32,
    /// Rumo em que a pista corre
    pub line_heading_deg: f32,
    /// Desvio máximo de rumo ainda sobre a pista
    pub line_tolerance_deg: f32,
    /// Fator de velocidade da roda direita (< 1 puxa o robô para a direita)
    pub right_wheel_scale: f32,
    /// Milímetros por grau de roda
    pub mm_per_wheel_deg: f32,
    /// Distância em que o para-choque encosta no objeto
    pub contact_mm: f32,
    pub object: Option<ObjectPlacement>,
}

impl Default for CourseLayout {
    fn default() -> Self {
        Self {
            stripe_deg: 180.0,
            black_value: 6,
            white_value: 54,
            off_course_value: 25,
            line_heading_deg: 0.0,
            line_tolerance_deg: 8.0,
            right_wheel_scale: 1.0,
            mm_per_wheel_deg: 0.49,
            contact_mm: 30.0,
            object: None,
        }
    }
}

impl CourseLayout {
    /// Curso da torre: pista de ladrilhos a 90°, torre a 180°, leve deriva
    pub fn tower() -> Self {
        Self {
            line_heading_deg: 90.0,
            right_wheel_scale: 0.99,
            object: Some(ObjectPlacement {
                bearing_deg: 180.0,
                range_mm: 5600.0,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Refletância sob o sensor na pose dada
    pub fn reflectance_at(&self, heading_deg: f32, odometer_deg: f32) -> i32 {
        if wrap_deg(heading_deg - self.line_heading_deg).abs() > self.line_tolerance_deg {
            return self.off_course_value;
        }
        let stripe = (odometer_deg / self.stripe_deg).floor() as i64;
        if stripe.rem_euclid(2) == 0 {
            self.black_value
        } else {
            self.white_value
        }
    }

    /// Distância real até o objeto (mm), se ele estiver no feixe
    fn object_range(&self, heading_deg: f32, odometer_deg: f32) -> Option<(f32, f32)> {
        let object = self.object?;
        let deviation = wrap_deg(heading_deg - object.bearing_deg).abs();
        if deviation > object.beam_deg / 2.0 {
            return None;
        }
        let range = (object.range_mm - odometer_deg * self.mm_per_wheel_deg).max(0.0);
        Some((range, deviation))
    }

    /// Leitura do ultrassom na pose dada
    pub fn distance_at(&self, heading_deg: f32, odometer_deg: f32) -> u32 {
        match self.object_range(heading_deg, odometer_deg) {
            Some((range, deviation)) => {
                let spread = self.object.map_or(0.0, |o| o.spread_mm_per_deg);
                (range + spread * deviation).round() as u32
            }
            None => MAX_RANGE_MM,
        }
    }

    /// Para-choque encostado no objeto?
    pub fn bumped_at(&self, heading_deg: f32, odometer_deg: f32) -> bool {
        self.object_range(heading_deg, odometer_deg)
            .is_some_and(|(range, _)| range <= self.contact_mm)
    }
}

/// Normaliza um ângulo para [-180, 180)
pub fn wrap_deg(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Botão do operador simulado: pressionado a partir de um instante agendado
#[derive(Debug, Clone)]
pub struct OperatorButton {
    press_at: Arc<Mutex<Option<Duration>>>,
    clock: SimClock,
}

impl OperatorButton {
    fn new(clock: SimClock) -> Self {
        Self {
            press_at: Arc::new(Mutex::new(None)),
            clock,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Duration>> {
        self.press_at.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Pressiona agora
    pub fn press(&self) {
        self.press_after(Duration::ZERO);
    }

    /// O operador pressiona depois de `delay` de tempo simulado
    pub fn press_after(&self, delay: Duration) {
        *self.lock() = Some(self.clock.now() + delay);
    }

    pub fn release(&self) {
        *self.lock() = None;
    }

    pub fn is_pressed(&self) -> bool {
        self.lock().is_some_and(|at| self.clock.now() >= at)
    }
}

/// Fontes de leitura dos três sensores
#[derive(Debug)]
pub struct SensorSources {
    pub reflectance: SampleSource<i32>,
    pub contact: SampleSource<bool>,
    pub distance: SampleSource<u32>,
}

/// Pose do robô lida dos dois motores
#[derive(Debug, Clone)]
struct Pose {
    left: MotorActuator,
    right: MotorActuator,
    steering_ratio: f32,
}

impl Pose {
    fn heading_deg(&self) -> f32 {
        (self.left.position() - self.right.position()) / (2.0 * self.steering_ratio)
    }

    fn odometer_deg(&self) -> f32 {
        (self.left.position() + self.right.position()) / 2.0
    }
}

/// Curso simulado com o hardware do robô
#[derive(Debug, Clone)]
pub struct SimCourse {
    layout: CourseLayout,
    clock: SimClock,
    pose: Pose,
    button: OperatorButton,
    speaker: Speaker,
}

impl SimCourse {
    /// Cria o curso e os motores. `config` fornece a razão de esterçamento.
    pub fn new(layout: CourseLayout, config: &NavConfig) -> NavResult<Self> {
        let clock = SimClock::new();
        let left = MotorActuator::named("left", MotorPort::B, clock.clone())?;
        let right = MotorActuator::with_config(
            MotorConfig {
                name: "right".into(),
                port: MotorPort::C,
                speed_scale: layout.right_wheel_scale,
                ..Default::default()
            },
            clock.clone(),
        )?;

        Ok(Self {
            layout,
            pose: Pose {
                left,
                right,
                steering_ratio: config.steering_ratio,
            },
            button: OperatorButton::new(clock.clone()),
            speaker: Speaker::muted(),
            clock,
        })
    }

    pub fn layout(&self) -> &CourseLayout {
        &self.layout
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Observador do motor esquerdo (estado compartilhado)
    pub fn left(&self) -> &MotorActuator {
        &self.pose.left
    }

    pub fn right(&self) -> &MotorActuator {
        &self.pose.right
    }

    pub fn button(&self) -> &OperatorButton {
        &self.button
    }

    /// Observador do alto-falante (registro compartilhado)
    pub fn speaker(&self) -> &Speaker {
        &self.speaker
    }

    pub fn heading_deg(&self) -> f32 {
        self.pose.heading_deg()
    }

    pub fn odometer_deg(&self) -> f32 {
        self.pose.odometer_deg()
    }

    /// Sondas que leem o curso a partir da pose atual
    pub fn live_sources(&self) -> SensorSources {
        let layout = self.layout;

        let pose = self.pose.clone();
        let reflectance = SampleSource::live(move || {
            layout.reflectance_at(pose.heading_deg(), pose.odometer_deg())
        });

        let pose = self.pose.clone();
        let distance = SampleSource::live(move || {
            layout.distance_at(pose.heading_deg(), pose.odometer_deg())
        });

        SensorSources {
            reflectance,
            contact: self.contact_source(),
            distance,
        }
    }

    /// Toque = para-choque no objeto ou botão do operador
    pub fn contact_source(&self) -> SampleSource<bool> {
        let layout = self.layout;
        let pose = self.pose.clone();
        let button = self.button.clone();
        SampleSource::live(move || {
            button.is_pressed() || layout.bumped_at(pose.heading_deg(), pose.odometer_deg())
        })
    }

    /// Robô lendo o próprio curso
    pub fn robot(&self, config: NavConfig) -> NavResult<Robot> {
        self.robot_with(config, self.live_sources())
    }

    /// Robô com os motores do curso e sensores arbitrários
    pub fn robot_with(&self, config: NavConfig, sources: SensorSources) -> NavResult<Robot> {
        let drive = DifferentialDrive::new(
            self.pose.left.clone(),
            self.pose.right.clone(),
            Arc::new(self.clock.clone()),
            DriveConfig::from(&config),
        )?;

        Robot::new(
            drive,
            Box::new(ColorSensor::new(sources.reflectance)?),
            Box::new(TouchSensor::new(sources.contact)?),
            Box::new(UltrasonicSensor::new(sources.distance)?),
            Box::new(self.speaker.clone()),
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_deg() {
        assert_eq!(wrap_deg(0.0), 0.0);
        assert_eq!(wrap_deg(190.0), -170.0);
        assert_eq!(wrap_deg(-190.0), 170.0);
        assert_eq!(wrap_deg(360.0), 0.0);
    }

    #[test]
    fn test_stripes_alternate() {
        let layout = CourseLayout::default();
        assert_eq!(layout.reflectance_at(0.0, 0.0), 6);
        assert_eq!(layout.reflectance_at(0.0, 179.0), 6);
        assert_eq!(layout.reflectance_at(0.0, 180.0), 54);
        assert_eq!(layout.reflectance_at(0.0, 360.0), 6);
        assert_eq!(layout.reflectance_at(0.0, -10.0), 54);
    }

    #[test]
    fn test_off_course_beyond_tolerance() {
        let layout = CourseLayout::default();
        assert_eq!(layout.reflectance_at(7.5, 0.0), 6);
        assert_eq!(layout.reflectance_at(9.0, 0.0), 25);
        assert_eq!(layout.reflectance_at(-9.0, 200.0), 25);
    }

    #[test]
    fn test_distance_model() {
        let layout = CourseLayout {
            object: Some(ObjectPlacement {
                bearing_deg: 30.0,
                range_mm: 600.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(layout.distance_at(30.0, 0.0), 600);
        assert_eq!(layout.distance_at(25.0, 0.0), 620);
        assert_eq!(layout.distance_at(0.0, 0.0), MAX_RANGE_MM);
        // avançar aproxima
        assert!(layout.distance_at(30.0, 360.0) < 600);
        assert!(!layout.bumped_at(30.0, 0.0));
        assert!(layout.bumped_at(30.0, 1200.0));
    }

    #[test]
    fn test_no_object_reads_max_range() {
        let layout = CourseLayout::default();
        assert_eq!(layout.distance_at(0.0, 0.0), MAX_RANGE_MM);
        assert!(!layout.bumped_at(0.0, 0.0));
    }

    #[test]
    fn test_operator_button() {
        let clock = SimClock::new();
        let button = OperatorButton::new(clock.clone());
        assert!(!button.is_pressed());

        button.press_after(Duration::from_secs(1));
        assert!(!button.is_pressed());
        clock.sleep(Duration::from_secs(1));
        assert!(button.is_pressed());

        button.release();
        assert!(!button.is_pressed());
    }

    #[test]
    fn test_robot_reads_course() {
        let config = NavConfig::default();
        let course = SimCourse::new(CourseLayout::default(), &config).unwrap();
        let mut robot = course.robot(config).unwrap();

        assert_eq!(robot.read_reflectance().unwrap().value, 6);
        assert!(robot.on_course().unwrap());
        assert!(!robot.is_pressed().unwrap());

        robot.rotate(20.0, 360.0).unwrap();
        assert!(!robot.on_course().unwrap());
        assert!((course.heading_deg() - 20.0).abs() < 1e-3);
    }
}
