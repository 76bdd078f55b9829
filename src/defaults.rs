// Copyright (c) 2024 Rafael Villar Burke <pachi@ietcc.csic.es>
// Distributed under the MIT License
// (See acoompanying LICENSE file or a copy at http://opensource.org/licenses/MIT)

//! Biblioteca de valores por defecto (C2, §4.2): plantillas de tipo de
//! edificio, conjuntos de construcción ASHRAE 90.1 por zona climática,
//! eficiencias de HVAC, y los ajustadores de antigüedad y LEED.
//!
//! Cargada una vez, de solo lectura el resto del proceso (§5 "Shared
//! resources"): se sigue el patrón `once_cell::sync::Lazy` de
//! `bemodel::climatedata`, con mapas indexados por enumeración en vez de
//! cadena.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::common::{BuildingType, ClimateZone, HvacType, LeedLevel, SpaceType};

/// Plantilla de cargas y huella por tipo de edificio (§4.2 "Building template").
#[derive(Debug, Clone)]
pub struct BuildingTemplate {
    pub target_hvac: HvacType,
    pub lighting_w_m2: f64,
    pub equipment_w_m2: f64,
    pub occupancy_people_m2: f64,
    pub infiltration_ach: f64,
    pub wwr: f64,
    /// Mezcla de tipos de espacio con fracciones que suman 1.0.
    pub space_mix: Vec<(SpaceType, f64)>,
    /// Tamaño de celda objetivo para el tilado de C4, en m².
    pub target_cell_size_m2: f64,
    /// Factor de carga de refrigeración, W/m² (§4.6 "Sizing").
    pub cooling_w_m2: f64,
    /// Factor de carga de calefacción, W/m² (§4.6 "Sizing").
    pub heating_w_m2: f64,
}

/// Conjunto de construcciones conforme a ASHRAE 90.1 para una zona climática.
#[derive(Debug, Clone)]
pub struct ConstructionSet {
    pub wall_u: f64,
    pub roof_u: f64,
    pub floor_u: f64,
    pub ground_floor_u: f64,
    pub window_u: f64,
    pub window_shgc: f64,
    pub window_vt: f64,
    pub wall_insulation_r: f64,
}

/// Eficiencias de equipos HVAC (§4.2 "HVAC efficiencies").
#[derive(Debug, Clone, Copy)]
pub struct HvacEfficiencies {
    pub fan_pressure_rise_pa: f64,
    pub cooling_cop: f64,
    pub heating_eff: f64,
    pub boiler_eff: f64,
    pub chiller_cop: f64,
}

/// Registro de valores por defecto completo tras aplicar antigüedad y LEED.
#[derive(Debug, Clone)]
pub struct DefaultsRecord {
    pub template: BuildingTemplate,
    pub construction: ConstructionSet,
    pub hvac: HvacEfficiencies,
}

/// Banda de ajuste por antigüedad (§4.2, tabla de bandas).
#[derive(Debug, Clone, Copy)]
pub struct AgeBand {
    pub infiltration_mult: f64,
    pub hvac_eta_mult: f64,
    pub window_u_mult: f64,
    pub insulation_r_mult: f64,
}

const MODERN_BAND: AgeBand = AgeBand {
    infiltration_mult: 1.0,
    hvac_eta_mult: 1.0,
    window_u_mult: 1.0,
    insulation_r_mult: 1.0,
};

/// Devuelve la banda de antigüedad aplicable para un año efectivo. Sin año
/// (`None`) se trata como moderno (§4.2 "if absent, treat as modern").
pub fn age_band_for(effective_year: Option<i32>) -> AgeBand {
    let year = match effective_year {
        Some(y) => y,
        None => return MODERN_BAND,
    };
    match year {
        y if y < 1920 => AgeBand {
            infiltration_mult: 3.5,
            hvac_eta_mult: 0.40,
            window_u_mult: 3.8,
            insulation_r_mult: 0.12,
        },
        1920..=1929 => AgeBand {
            infiltration_mult: 3.0,
            hvac_eta_mult: 0.55,
            window_u_mult: 2.8,
            insulation_r_mult: 0.20,
        },
        1930..=1979 => AgeBand {
            infiltration_mult: 2.53,
            hvac_eta_mult: 0.585,
            window_u_mult: 2.75,
            insulation_r_mult: 0.30,
        },
        1980..=1999 => AgeBand {
            infiltration_mult: 1.5,
            hvac_eta_mult: 0.80,
            window_u_mult: 1.5,
            insulation_r_mult: 0.60,
        },
        2000..=2010 => AgeBand {
            infiltration_mult: 1.2,
            hvac_eta_mult: 0.90,
            window_u_mult: 1.2,
            insulation_r_mult: 0.85,
        },
        _ => MODERN_BAND,
    }
}

/// Multiplicadores de ajuste LEED (§4.2 "LEED adjustment").
#[derive(Debug, Clone, Copy)]
pub struct LeedMultipliers {
    pub eui_mult: f64,
    pub hvac_mult: f64,
    pub lighting_mult: f64,
    pub equipment_mult: f64,
    pub envelope_mult: f64,
    pub triple_pane_window_mult: f64,
}

const NO_LEED: LeedMultipliers = LeedMultipliers {
    eui_mult: 1.0,
    hvac_mult: 1.0,
    lighting_mult: 1.0,
    equipment_mult: 1.0,
    envelope_mult: 1.0,
    triple_pane_window_mult: 1.0,
};

/// Multiplicadores para Platinum (§4.2); Gold/Silver/Certified escalan
/// proporcionalmente sobre la distancia Platinum - 1.0.
const PLATINUM: LeedMultipliers = LeedMultipliers {
    eui_mult: 0.72,
    hvac_mult: 1.28,
    lighting_mult: 1.35,
    equipment_mult: 1.18,
    envelope_mult: 1.25,
    triple_pane_window_mult: 1.15,
};

pub fn leed_multipliers(level: LeedLevel) -> LeedMultipliers {
    let scale = match level {
        LeedLevel::None => return NO_LEED,
        LeedLevel::Certified => 0.25,
        LeedLevel::Silver => 0.5,
        LeedLevel::Gold => 0.75,
        LeedLevel::Platinum => 1.0,
    };
    let lerp = |from: f64, to: f64| from + (to - from) * scale;
    LeedMultipliers {
        eui_mult: lerp(NO_LEED.eui_mult, PLATINUM.eui_mult),
        hvac_mult: lerp(NO_LEED.hvac_mult, PLATINUM.hvac_mult),
        lighting_mult: lerp(NO_LEED.lighting_mult, PLATINUM.lighting_mult),
        equipment_mult: lerp(NO_LEED.equipment_mult, PLATINUM.equipment_mult),
        envelope_mult: lerp(NO_LEED.envelope_mult, PLATINUM.envelope_mult),
        triple_pane_window_mult: lerp(
            NO_LEED.triple_pane_window_mult,
            PLATINUM.triple_pane_window_mult,
        ),
    }
}

fn building_templates() -> &'static HashMap<BuildingType, BuildingTemplate> {
    static TEMPLATES: Lazy<HashMap<BuildingType, BuildingTemplate>> = Lazy::new(|| {
        let mut m = HashMap::new();
        m.insert(
            BuildingType::Office,
            BuildingTemplate {
                target_hvac: HvacType::Vav,
                lighting_w_m2: 9.0,
                equipment_w_m2: 8.0,
                occupancy_people_m2: 0.05,
                infiltration_ach: 0.4,
                wwr: 0.4,
                space_mix: vec![
                    (SpaceType::OfficeOpen, 0.6),
                    (SpaceType::Conference, 0.15),
                    (SpaceType::Storage, 0.1),
                    (SpaceType::Lobby, 0.1),
                    (SpaceType::Mechanical, 0.05),
                ],
                target_cell_size_m2: 80.0,
                cooling_w_m2: 60.0,
                heating_w_m2: 45.0,
            },
        );
        m.insert(
            BuildingType::Retail,
            BuildingTemplate {
                target_hvac: HvacType::Rtu,
                lighting_w_m2: 14.0,
                equipment_w_m2: 5.0,
                occupancy_people_m2: 0.15,
                infiltration_ach: 0.5,
                wwr: 0.3,
                space_mix: vec![
                    (SpaceType::SalesFloor, 0.8),
                    (SpaceType::Storage, 0.15),
                    (SpaceType::Mechanical, 0.05),
                ],
                target_cell_size_m2: 150.0,
                cooling_w_m2: 70.0,
                heating_w_m2: 40.0,
            },
        );
        m.insert(
            BuildingType::School,
            BuildingTemplate {
                target_hvac: HvacType::Vav,
                lighting_w_m2: 10.0,
                equipment_w_m2: 6.0,
                occupancy_people_m2: 0.25,
                infiltration_ach: 0.5,
                wwr: 0.35,
                space_mix: vec![
                    (SpaceType::Classroom, 0.65),
                    (SpaceType::Lobby, 0.1),
                    (SpaceType::Storage, 0.15),
                    (SpaceType::Mechanical, 0.1),
                ],
                target_cell_size_m2: 70.0,
                cooling_w_m2: 50.0,
                heating_w_m2: 50.0,
            },
        );
        m.insert(
            BuildingType::Hospital,
            BuildingTemplate {
                target_hvac: HvacType::ChilledWater,
                lighting_w_m2: 12.0,
                equipment_w_m2: 15.0,
                occupancy_people_m2: 0.1,
                infiltration_ach: 0.3,
                wwr: 0.3,
                space_mix: vec![
                    (SpaceType::Ward, 0.55),
                    (SpaceType::Lobby, 0.1),
                    (SpaceType::Storage, 0.2),
                    (SpaceType::Mechanical, 0.15),
                ],
                target_cell_size_m2: 60.0,
                cooling_w_m2: 80.0,
                heating_w_m2: 65.0,
            },
        );
        m.insert(
            BuildingType::ResidentialSingle,
            BuildingTemplate {
                target_hvac: HvacType::HeatPump,
                lighting_w_m2: 6.0,
                equipment_w_m2: 5.0,
                occupancy_people_m2: 0.03,
                infiltration_ach: 0.6,
                wwr: 0.25,
                space_mix: vec![
                    (SpaceType::LivingRoom, 0.7),
                    (SpaceType::Kitchen, 0.15),
                    (SpaceType::Storage, 0.15),
                ],
                target_cell_size_m2: 120.0,
                cooling_w_m2: 45.0,
                heating_w_m2: 55.0,
            },
        );
        m.insert(
            BuildingType::ResidentialMulti,
            BuildingTemplate {
                target_hvac: HvacType::Ptac,
                lighting_w_m2: 6.0,
                equipment_w_m2: 5.0,
                occupancy_people_m2: 0.03,
                infiltration_ach: 0.5,
                wwr: 0.3,
                space_mix: vec![
                    (SpaceType::LivingRoom, 0.75),
                    (SpaceType::Kitchen, 0.1),
                    (SpaceType::Storage, 0.1),
                    (SpaceType::Mechanical, 0.05),
                ],
                target_cell_size_m2: 60.0,
                cooling_w_m2: 50.0,
                heating_w_m2: 55.0,
            },
        );
        m.insert(
            BuildingType::Warehouse,
            BuildingTemplate {
                target_hvac: HvacType::Rtu,
                lighting_w_m2: 5.0,
                equipment_w_m2: 2.0,
                occupancy_people_m2: 0.01,
                infiltration_ach: 0.3,
                wwr: 0.1,
                space_mix: vec![(SpaceType::Storage, 0.9), (SpaceType::Mechanical, 0.1)],
                target_cell_size_m2: 200.0,
                cooling_w_m2: 20.0,
                heating_w_m2: 25.0,
            },
        );
        m.insert(
            BuildingType::Hotel,
            BuildingTemplate {
                target_hvac: HvacType::Ptac,
                lighting_w_m2: 8.0,
                equipment_w_m2: 6.0,
                occupancy_people_m2: 0.06,
                infiltration_ach: 0.4,
                wwr: 0.35,
                space_mix: vec![
                    (SpaceType::LivingRoom, 0.7),
                    (SpaceType::Lobby, 0.15),
                    (SpaceType::Storage, 0.1),
                    (SpaceType::Mechanical, 0.05),
                ],
                target_cell_size_m2: 50.0,
                cooling_w_m2: 55.0,
                heating_w_m2: 50.0,
            },
        );
        m.insert(
            BuildingType::Restaurant,
            BuildingTemplate {
                target_hvac: HvacType::Rtu,
                lighting_w_m2: 11.0,
                equipment_w_m2: 20.0,
                occupancy_people_m2: 0.3,
                infiltration_ach: 0.6,
                wwr: 0.3,
                space_mix: vec![
                    (SpaceType::Kitchen, 0.3),
                    (SpaceType::SalesFloor, 0.6),
                    (SpaceType::Mechanical, 0.1),
                ],
                target_cell_size_m2: 90.0,
                cooling_w_m2: 90.0,
                heating_w_m2: 50.0,
            },
        );
        // Tipo desconocido/otro: se resuelve como Office (§4.2 "Tie-breaks").
        let office = m.get(&BuildingType::Office).unwrap().clone();
        m.insert(BuildingType::Other, office);
        m
    });
    &TEMPLATES
}

fn construction_sets() -> &'static HashMap<ClimateZone, ConstructionSet> {
    static SETS: Lazy<HashMap<ClimateZone, ConstructionSet>> = Lazy::new(|| {
        use ClimateZone::*;
        let mut m = HashMap::new();
        // Climas cálidos (C1-C3): envolvente ligera, ventana con mejor SHGC.
        m.insert(
            C1,
            ConstructionSet {
                wall_u: 0.7,
                roof_u: 0.36,
                floor_u: 0.6,
                ground_floor_u: 0.5,
                window_u: 3.7,
                window_shgc: 0.25,
                window_vt: 0.5,
                wall_insulation_r: 1.8,
            },
        );
        m.insert(
            C2,
            ConstructionSet {
                wall_u: 0.63,
                roof_u: 0.34,
                floor_u: 0.55,
                ground_floor_u: 0.48,
                window_u: 3.5,
                window_shgc: 0.3,
                window_vt: 0.5,
                wall_insulation_r: 2.0,
            },
        );
        m.insert(
            C3,
            ConstructionSet {
                wall_u: 0.52,
                roof_u: 0.27,
                floor_u: 0.45,
                ground_floor_u: 0.4,
                window_u: 3.2,
                window_shgc: 0.35,
                window_vt: 0.55,
                wall_insulation_r: 2.4,
            },
        );
        m.insert(
            C4,
            ConstructionSet {
                wall_u: 0.43,
                roof_u: 0.22,
                floor_u: 0.38,
                ground_floor_u: 0.35,
                window_u: 2.8,
                window_shgc: 0.4,
                window_vt: 0.6,
                wall_insulation_r: 2.9,
            },
        );
        m.insert(
            C5,
            ConstructionSet {
                wall_u: 0.37,
                roof_u: 0.18,
                floor_u: 0.33,
                ground_floor_u: 0.3,
                window_u: 2.5,
                window_shgc: 0.4,
                window_vt: 0.6,
                wall_insulation_r: 3.4,
            },
        );
        m.insert(
            C6,
            ConstructionSet {
                wall_u: 0.3,
                roof_u: 0.15,
                floor_u: 0.28,
                ground_floor_u: 0.26,
                window_u: 2.2,
                window_shgc: 0.45,
                window_vt: 0.6,
                wall_insulation_r: 4.2,
            },
        );
        m.insert(
            C7,
            ConstructionSet {
                wall_u: 0.25,
                roof_u: 0.13,
                floor_u: 0.24,
                ground_floor_u: 0.22,
                window_u: 1.9,
                window_shgc: 0.5,
                window_vt: 0.6,
                wall_insulation_r: 5.0,
            },
        );
        m.insert(
            C8,
            ConstructionSet {
                wall_u: 0.2,
                roof_u: 0.1,
                floor_u: 0.2,
                ground_floor_u: 0.18,
                window_u: 1.6,
                window_shgc: 0.55,
                window_vt: 0.6,
                wall_insulation_r: 6.0,
            },
        );
        m
    });
    &SETS
}

fn hvac_efficiencies() -> &'static HashMap<BuildingType, HvacEfficiencies> {
    static EFF: Lazy<HashMap<BuildingType, HvacEfficiencies>> = Lazy::new(|| {
        let base = HvacEfficiencies {
            fan_pressure_rise_pa: 600.0,
            cooling_cop: 3.2,
            heating_eff: 0.95,
            boiler_eff: 0.85,
            chiller_cop: 5.5,
        };
        let mut m = HashMap::new();
        for bt in [
            BuildingType::Office,
            BuildingType::Retail,
            BuildingType::School,
            BuildingType::Warehouse,
            BuildingType::Hotel,
            BuildingType::Restaurant,
            BuildingType::ResidentialSingle,
            BuildingType::ResidentialMulti,
            BuildingType::Other,
        ] {
            m.insert(bt, base);
        }
        m.insert(
            BuildingType::Hospital,
            HvacEfficiencies {
                fan_pressure_rise_pa: 900.0,
                cooling_cop: 3.0,
                heating_eff: 0.92,
                boiler_eff: 0.88,
                chiller_cop: 5.2,
            },
        );
        m
    });
    &EFF
}

/// Punto de entrada de la biblioteca de valores por defecto (C2).
pub struct DefaultsLibrary;

impl DefaultsLibrary {
    /// Los mapas son estáticos (`once_cell::Lazy`); "cargar" la biblioteca
    /// es gratis y no necesita estado propio — refleja que es un recurso de
    /// solo lectura compartido por todo el proceso (§5).
    pub fn load() -> Self {
        DefaultsLibrary
    }

    pub fn building_template(&self, building_type: BuildingType) -> BuildingTemplate {
        building_templates()
            .get(&building_type)
            .cloned()
            .unwrap_or_else(|| building_templates().get(&BuildingType::Office).unwrap().clone())
    }

    pub fn construction_set(&self, climate: ClimateZone) -> ConstructionSet {
        construction_sets().get(&climate).unwrap().clone()
    }

    pub fn hvac_efficiencies(&self, building_type: BuildingType) -> HvacEfficiencies {
        *hvac_efficiencies()
            .get(&building_type)
            .unwrap_or_else(|| hvac_efficiencies().get(&BuildingType::Office).unwrap())
    }

    /// Resuelve el registro de valores por defecto completo para
    /// `(building_type, climate_zone, year_built, retrofit_year, leed_level)`,
    /// aplicando antigüedad y luego LEED multiplicativamente (§4.2).
    pub fn resolve(
        &self,
        building_type: BuildingType,
        climate: ClimateZone,
        year_built: Option<i32>,
        retrofit_year: Option<i32>,
        leed_level: LeedLevel,
    ) -> DefaultsRecord {
        let mut template = self.building_template(building_type);
        let mut construction = self.construction_set(climate);
        let mut hvac = self.hvac_efficiencies(building_type);

        let effective_year = retrofit_year.or(year_built);
        let age = age_band_for(effective_year);
        template.infiltration_ach *= age.infiltration_mult;
        hvac.cooling_cop *= age.hvac_eta_mult;
        hvac.heating_eff *= age.hvac_eta_mult;
        hvac.boiler_eff *= age.hvac_eta_mult;
        hvac.chiller_cop *= age.hvac_eta_mult;
        construction.window_u *= age.window_u_mult;
        construction.wall_insulation_r *= age.insulation_r_mult;
        construction.wall_u /= age.insulation_r_mult.max(0.05);

        let leed = leed_multipliers(leed_level);
        hvac.cooling_cop *= leed.hvac_mult;
        hvac.heating_eff *= leed.hvac_mult;
        template.lighting_w_m2 /= leed.lighting_mult;
        template.equipment_w_m2 /= leed.equipment_mult;
        construction.wall_u /= leed.envelope_mult;
        construction.roof_u /= leed.envelope_mult;
        if leed_level == LeedLevel::Platinum {
            construction.window_u /= leed.triple_pane_window_mult;
        }

        DefaultsRecord {
            template,
            construction,
            hvac,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_building_type_falls_back_to_office() {
        let defaults = DefaultsLibrary::load();
        let other = defaults.building_template(BuildingType::Other);
        let office = defaults.building_template(BuildingType::Office);
        assert_eq!(other.target_hvac, office.target_hvac);
        assert!((other.lighting_w_m2 - office.lighting_w_m2).abs() < 1e-9);
    }

    #[test]
    fn pre_1980_band_degrades_efficiency_vs_modern() {
        let defaults = DefaultsLibrary::load();
        let old = defaults.resolve(
            BuildingType::Office,
            ClimateZone::C4,
            Some(1973),
            None,
            LeedLevel::None,
        );
        let modern = defaults.resolve(
            BuildingType::Office,
            ClimateZone::C4,
            None,
            None,
            LeedLevel::None,
        );
        assert!(old.hvac.cooling_cop < modern.hvac.cooling_cop);
        assert!(old.template.infiltration_ach > modern.template.infiltration_ach);
    }

    #[test]
    fn platinum_leed_improves_envelope_and_hvac() {
        let defaults = DefaultsLibrary::load();
        let base = defaults.resolve(
            BuildingType::Office,
            ClimateZone::C4,
            None,
            None,
            LeedLevel::None,
        );
        let platinum = defaults.resolve(
            BuildingType::Office,
            ClimateZone::C4,
            None,
            None,
            LeedLevel::Platinum,
        );
        assert!(platinum.hvac.cooling_cop > base.hvac.cooling_cop);
        assert!(platinum.construction.wall_u < base.construction.wall_u);
        assert!(platinum.construction.window_u < base.construction.window_u);
    }

    #[test]
    fn gold_scales_between_none_and_platinum() {
        let none = leed_multipliers(LeedLevel::None);
        let gold = leed_multipliers(LeedLevel::Gold);
        let platinum = leed_multipliers(LeedLevel::Platinum);
        assert!(gold.hvac_mult > none.hvac_mult);
        assert!(gold.hvac_mult < platinum.hvac_mult);
    }
}
