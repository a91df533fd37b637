// src/services/dosing.rs
//
// Calculadora de dosagem química da piscina. Cálculo puro em f64, com o
// volume do tanque fixo (não existe mais de uma piscina para administrar).

use crate::models::inventory::{DosageSuggestion, ReagentPurity, WaterReadings};

pub const POOL_VOLUME_GAL: f64 = 610_000.0;
pub const POOL_VOLUME_M3: f64 = 2_309.1;

// Dose base: 2 lb de hipoclorito por 16 galões-padrão sobem 1 ppm em
// 10.000 gal, calibrada para produto a 65%.
const BASE_CL_LB_PER_PPM: f64 = 2.0 / 16.0;
const BASE_CL_PURITY: f64 = 65.0;

// 1 lb de redutor de pH (93%) baixa 0.2 de pH por 10.000 gal.
const BASE_PH_DOWN_LB_PER_STEP: f64 = 1.0;
const PH_STEP: f64 = 0.2;
const BASE_PH_DOWN_PURITY: f64 = 93.0;

// 2.20462 lb/kg; 1 kg de bicarbonato sobe 10 ppm em 50 m³.
const KG_TO_LB: f64 = 2.20462;
const BASE_ALK_PURITY: f64 = 100.0;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Sugestão de massa seca (lb) para levar cada leitura à meta. Leituras já
// acima da meta (ou metas já atingidas) rendem zero: nunca se sugere dose
// negativa.
pub fn suggest(readings: &WaterReadings, purity: &ReagentPurity) -> DosageSuggestion {
    let factor_vol_10k = POOL_VOLUME_GAL / 10_000.0;

    let chlorine_diff = (readings.target_chlorine - readings.chlorine).max(0.0);
    let chlorine_lb = chlorine_diff
        * BASE_CL_LB_PER_PPM
        * factor_vol_10k
        * (BASE_CL_PURITY / purity.chlorine_purity);

    let ph_diff = (readings.ph - readings.target_ph).max(0.0);
    let ph_down_lb = (ph_diff / PH_STEP)
        * BASE_PH_DOWN_LB_PER_STEP
        * factor_vol_10k
        * (BASE_PH_DOWN_PURITY / purity.ph_down_purity);

    let alk_diff = (readings.target_alkalinity - readings.alkalinity).max(0.0);
    let factor_alk_m3 = POOL_VOLUME_M3 / 50.0;
    let alkalinity_lb =
        (alk_diff / 10.0) * factor_alk_m3 * KG_TO_LB * (BASE_ALK_PURITY / purity.alkalinity_purity);

    DosageSuggestion {
        chlorine_lb: round2(chlorine_lb),
        ph_down_lb: round2(ph_down_lb),
        alkalinity_lb: round2(alkalinity_lb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn readings(ph: f64, chlorine: f64, alkalinity: f64) -> WaterReadings {
        WaterReadings {
            ph,
            chlorine,
            alkalinity,
            target_ph: 7.4,
            target_chlorine: 3.0,
            target_alkalinity: 100.0,
        }
    }

    #[test]
    fn ph_alto_com_pureza_padrao() {
        // 7.8 -> 7.4 com redutor a 93%: (0.4 / 0.2) * 1.0 * 61 * 1.0 = 122 lb
        let suggestion = suggest(&readings(7.8, 3.0, 100.0), &ReagentPurity::default());
        assert_eq!(suggestion.ph_down_lb, 122.0);
        assert_eq!(suggestion.chlorine_lb, 0.0);
        assert_eq!(suggestion.alkalinity_lb, 0.0);
    }

    #[test]
    fn cloro_abaixo_da_meta() {
        // 1.0 -> 3.0 ppm a 65%: 2.0 * (2/16) * 61 * 1.0 = 15.25 lb
        let suggestion = suggest(&readings(7.4, 1.0, 100.0), &ReagentPurity::default());
        assert_eq!(suggestion.chlorine_lb, 15.25);
    }

    #[test]
    fn cloro_acima_da_meta_nao_sugere_dose_negativa() {
        let suggestion = suggest(&readings(7.4, 5.0, 100.0), &ReagentPurity::default());
        assert_eq!(suggestion.chlorine_lb, 0.0);
    }

    #[test]
    fn alcalinidade_baixa() {
        // 80 -> 100 ppm a 100%: (20/10) * (2309.1/50) * 2.20462 = 203.63 lb
        let suggestion = suggest(&readings(7.4, 3.0, 80.0), &ReagentPurity::default());
        assert_eq!(suggestion.alkalinity_lb, 203.63);
    }

    #[test]
    fn pureza_menor_exige_mais_produto() {
        let padrao = suggest(&readings(7.4, 1.0, 100.0), &ReagentPurity::default());
        let diluido = suggest(
            &readings(7.4, 1.0, 100.0),
            &ReagentPurity {
                chlorine_purity: 32.5,
                ..ReagentPurity::default()
            },
        );
        assert_eq!(diluido.chlorine_lb, round2(padrao.chlorine_lb * 2.0));
    }

    #[test]
    fn agua_equilibrada_zera_tudo() {
        let suggestion = suggest(&readings(7.4, 3.0, 100.0), &ReagentPurity::default());
        assert_eq!(
            suggestion,
            DosageSuggestion {
                chlorine_lb: 0.0,
                ph_down_lb: 0.0,
                alkalinity_lb: 0.0
            }
        );
    }
}
