// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Horarios canónicos por tipo de espacio (C5, §4.5): un `Schedule:Compact`
//! por nombre único `Occupancy_<space>` / `Lighting_<space>` /
//! `Equipment_<space>` / `Activity_<space>`, compartido por todas las zonas
//! de ese tipo de espacio.
//!
//! La variación estacional (§4.5 "optional and off by default") añade tres
//! períodos (Jan-Apr, May-Aug, Sep-Dec) con horas ligeramente distintas;
//! activada o no, el número de períodos se mantiene muy por debajo del
//! límite de campos de EnergyPlus (~12 períodos máximo).

use crate::common::{ScheduleType, SpaceType};
use crate::model::{Model, Schedule, ScheduleRule};

/// Nombre canónico del horario de ocupación de un tipo de espacio.
pub fn occupancy_schedule_name(space: SpaceType) -> String {
    format!("Occupancy_{}", space)
}

/// Nombre canónico del horario de iluminación de un tipo de espacio.
pub fn lighting_schedule_name(space: SpaceType) -> String {
    format!("Lighting_{}", space)
}

/// Nombre canónico del horario de equipos de un tipo de espacio.
pub fn equipment_schedule_name(space: SpaceType) -> String {
    format!("Equipment_{}", space)
}

/// Nombre canónico del horario de nivel de actividad de un tipo de espacio.
pub fn activity_schedule_name(space: SpaceType) -> String {
    format!("Activity_{}", space)
}

/// Perfil horario base (0-23h) de un tipo de espacio, usado tanto en el
/// período único (sin variación estacional) como como punto de partida de
/// los tres períodos estacionales.
struct DailyProfile {
    occupied_hours: (u32, u32),
    occupied_fraction: f64,
    unoccupied_fraction: f64,
}

fn profile_for(space: SpaceType) -> DailyProfile {
    use SpaceType::*;
    match space {
        OfficeOpen | Conference | Lobby => DailyProfile {
            occupied_hours: (7, 19),
            occupied_fraction: 0.9,
            unoccupied_fraction: 0.05,
        },
        Classroom => DailyProfile {
            occupied_hours: (7, 17),
            occupied_fraction: 0.95,
            unoccupied_fraction: 0.02,
        },
        SalesFloor => DailyProfile {
            occupied_hours: (9, 21),
            occupied_fraction: 0.85,
            unoccupied_fraction: 0.1,
        },
        Ward => DailyProfile {
            // Ocupación hospitalaria: prácticamente continua.
            occupied_hours: (0, 24),
            occupied_fraction: 0.7,
            unoccupied_fraction: 0.5,
        },
        Kitchen => DailyProfile {
            occupied_hours: (6, 22),
            occupied_fraction: 0.8,
            unoccupied_fraction: 0.05,
        },
        LivingRoom => DailyProfile {
            occupied_hours: (6, 23),
            occupied_fraction: 0.6,
            unoccupied_fraction: 0.3,
        },
        Storage | Mechanical => DailyProfile {
            occupied_hours: (8, 17),
            occupied_fraction: 0.2,
            unoccupied_fraction: 0.05,
        },
    }
}

/// Construye un perfil de 24 horas a partir de un `DailyProfile`, desplazado
/// `shift_hours` (usado para dar variación estacional sin cambiar la forma).
fn hourly_values(profile: &DailyProfile, shift_hours: i32) -> [f64; 24] {
    let (start, end) = profile.occupied_hours;
    let mut values = [profile.unoccupied_fraction; 24];
    for h in 0..24u32 {
        let shifted = ((h as i32 - shift_hours).rem_euclid(24)) as u32;
        if shifted >= start && shifted < end {
            values[h as usize] = profile.occupied_fraction;
        }
    }
    values
}

fn full_year_rule(values: [f64; 24]) -> ScheduleRule {
    ScheduleRule {
        day_of_year_range: (1, 365),
        day_type: "AllDays".to_string(),
        hourly_values: values,
    }
}

/// Tres reglas estacionales (§4.5): Jan-Apr, May-Aug, Sep-Dec, cada una con
/// un pequeño desplazamiento horario respecto al perfil base.
fn seasonal_rules(profile: &DailyProfile) -> Vec<ScheduleRule> {
    vec![
        ScheduleRule {
            day_of_year_range: (1, 120),
            day_type: "AllDays".to_string(),
            hourly_values: hourly_values(profile, -1),
        },
        ScheduleRule {
            day_of_year_range: (121, 243),
            day_type: "AllDays".to_string(),
            hourly_values: hourly_values(profile, 1),
        },
        ScheduleRule {
            day_of_year_range: (244, 365),
            day_type: "AllDays".to_string(),
            hourly_values: hourly_values(profile, 0),
        },
    ]
}

/// Horario de fracción (ocupación/iluminación/equipos) de un tipo de
/// espacio, con o sin variación estacional.
fn fraction_schedule(name: String, space: SpaceType, seasonal: bool) -> Schedule {
    let profile = profile_for(space);
    let rules = if seasonal {
        seasonal_rules(&profile)
    } else {
        vec![full_year_rule(hourly_values(&profile, 0))]
    };
    Schedule {
        name,
        schedule_type: ScheduleType::Fraction,
        rules,
    }
}

/// Nivel de actividad metabólica (W/persona) por tipo de espacio, usado
/// como valor constante del horario `Activity_<space>`.
fn activity_level_w(space: SpaceType) -> f64 {
    use SpaceType::*;
    match space {
        Kitchen => 200.0,
        SalesFloor | Ward => 130.0,
        Classroom | Conference | OfficeOpen | Lobby | LivingRoom => 120.0,
        Storage | Mechanical => 150.0,
    }
}

fn activity_schedule(name: String, space: SpaceType) -> Schedule {
    Schedule {
        name,
        schedule_type: ScheduleType::ActivityLevel,
        rules: vec![full_year_rule([activity_level_w(space); 24])],
    }
}

/// Declara, para cada tipo de espacio presente en el modelo, sus cuatro
/// horarios canónicos (§4.5). Idempotente: si un horario ya existe (varias
/// zonas comparten tipo de espacio) no lo vuelve a declarar en la
/// `NameTable`.
pub fn build_schedules(
    model: &mut Model,
    space_types: &[SpaceType],
    seasonal_variation: bool,
) -> Result<(), crate::error::ReferenceError> {
    for &space in space_types {
        let occ_name = occupancy_schedule_name(space);
        if !model.schedules.contains_key(&occ_name) {
            model.name_table.declare("Schedule", &occ_name, "schedules")?;
            model.schedules.insert(
                occ_name.clone(),
                fraction_schedule(occ_name, space, seasonal_variation),
            );
        }
        let light_name = lighting_schedule_name(space);
        if !model.schedules.contains_key(&light_name) {
            model.name_table.declare("Schedule", &light_name, "schedules")?;
            model.schedules.insert(
                light_name.clone(),
                fraction_schedule(light_name, space, seasonal_variation),
            );
        }
        let equip_name = equipment_schedule_name(space);
        if !model.schedules.contains_key(&equip_name) {
            model.name_table.declare("Schedule", &equip_name, "schedules")?;
            model.schedules.insert(
                equip_name.clone(),
                fraction_schedule(equip_name, space, seasonal_variation),
            );
        }
        let activity_name = activity_schedule_name(space);
        if !model.schedules.contains_key(&activity_name) {
            model.name_table.declare("Schedule", &activity_name, "schedules")?;
            model
                .schedules
                .insert(activity_name.clone(), activity_schedule(activity_name, space));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schedule_covers_the_full_year() {
        for seasonal in [false, true] {
            let s = fraction_schedule("Occupancy_OfficeOpen".into(), SpaceType::OfficeOpen, seasonal);
            assert!(s.covers_full_year(), "seasonal={seasonal}");
        }
    }

    #[test]
    fn seasonal_schedules_stay_under_the_period_limit() {
        let s = fraction_schedule("Occupancy_Ward".into(), SpaceType::Ward, true);
        assert!(s.rules.len() <= 12);
    }

    #[test]
    fn build_schedules_is_idempotent_across_shared_space_types() {
        let params = crate::params::resolve_parameters(
            &Default::default(),
            None,
            &crate::defaults::DefaultsLibrary::load(),
        )
        .unwrap();
        let mut model = Model::new(None, params);
        build_schedules(&mut model, &[SpaceType::OfficeOpen, SpaceType::OfficeOpen], false).unwrap();
        assert_eq!(model.schedules.len(), 4);
    }
}
