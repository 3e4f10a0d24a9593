//! Reference nomenclatures for the PMSI MCO domain.
//!
//! Every catalog maps a code to its label. The codes are real nomenclature
//! entries (GHM, CIM-10, CCAM, FINESS, ...) so that generated fixtures stay
//! coherent with the reference data downstream clients join against; the
//! rows built from them are always synthetic.

use std::collections::HashMap;

use crate::ventilation::VarValue;

// ---------------------------------------------------------------------------
// Clinical catalogs
// ---------------------------------------------------------------------------

/// GHM - Groupes Homogènes de Malades (6 characters: CMD + number + severity).
pub const GHM: &[(&str, &str)] = &[
    ("05M09T", "Affections de l'appareil circulatoire, sévérité 4"),
    ("05K06T", "Coronarographies, sévérité 4"),
    ("01M10T", "Affections du système nerveux, sévérité 4"),
    ("06C04Z", "Appendicectomies sans complication"),
    ("08M04T", "Affections de l'appareil musculosquelettique, sévérité 4"),
    ("14Z08Z", "Séances de chimiothérapie pour tumeur"),
    ("11M05T", "Affections du rein et des voies urinaires, sévérité 4"),
    ("23Z02Z", "Autres séjours de moins de 2 jours"),
];

/// GHM roots (5 characters, severity level stripped).
pub const RACINE_GHM: &[(&str, &str)] = &[
    ("05M09", "Affections de l'appareil circulatoire"),
    ("05K06", "Coronarographies"),
    ("01M10", "Affections du système nerveux - sévérité 4"),
    ("06C04", "Appendicectomies"),
    ("08M04", "Affections musculosquelettiques - sévérité 4"),
    ("14Z08", "Chimiothérapie pour tumeur"),
    ("11M05", "Affections du rein et des voies urinaires"),
];

/// CMD - Catégories Majeures de Diagnostic (2 digits).
pub const CMD: &[(&str, &str)] = &[
    ("01", "Affections du système nerveux"),
    ("05", "Affections de l'appareil circulatoire"),
    ("06", "Affections du tube digestif"),
    ("08", "Affections de l'appareil musculosquelettique"),
    ("11", "Affections du rein et des voies urinaires"),
    ("14", "Grossesses pathologiques, accouchements et affections du post-partum"),
    ("23", "Autres facteurs influant sur l'état de santé"),
];

/// CIM-10 diagnosis codes (used for DP, DR and DAS ventilations).
pub const CIM10: &[(&str, &str)] = &[
    ("C34", "Tumeur maligne des bronches et du poumon"),
    ("I50", "Insuffisance cardiaque"),
    ("J44", "Autres broncho-pneumopathies chroniques obstructives"),
    ("K80", "Lithiase biliaire"),
    ("S72", "Fracture du fémur"),
    ("I10", "Hypertension essentielle (primitive)"),
    ("E11", "Diabète de type 2"),
    ("N18", "Maladie rénale chronique"),
    ("J96", "Insuffisance respiratoire, non classée ailleurs"),
    ("E78", "Troubles du métabolisme des lipoprotéines"),
    ("F10", "Troubles mentaux et du comportement liés à l'utilisation d'alcool"),
    ("K57", "Maladie diverticulaire de l'intestin"),
];

/// CCAM procedure codes (4 letters + 3 digits).
pub const CCAM: &[(&str, &str)] = &[
    ("DZQM006", "Enregistrement du signal électrique de coeur"),
    ("YYYY600", "Acte fictif de test PMSI"),
    ("EQQP004", "Arthroplastie totale de hanche"),
    ("HFMA009", "Cholécystectomie par coelioscopie"),
    ("ZCQM002", "Tomographie par émission de positons du corps entier"),
    ("ABLB001", "Hémicolectomie droite par coelioscopie"),
    ("BFGA004", "Coronarographie"),
];

// ---------------------------------------------------------------------------
// Facility catalogs
// ---------------------------------------------------------------------------

/// FINESS PMSI facility codes (9 digits).
pub const FINESS: &[(&str, &str)] = &[
    ("130783293", "AP-HM HOPITAL DE LA TIMONE"),
    ("750100018", "AP-HP HOPITAL HOTEL-DIEU"),
    ("690023154", "HCL HOPITAL EDOUARD HERRIOT"),
    ("330781196", "CHU DE BORDEAUX"),
    ("310781406", "CHU DE TOULOUSE"),
    ("440000289", "CLINIQUE JULES VERNE"),
    ("060780491", "CLINIQUE SAINT-GEORGE"),
];

/// Facility categories.
pub const CATEG_ETAB: &[(&str, &str)] = &[
    ("CH", "Centre hospitalier"),
    ("CHU", "Centre hospitalo-universitaire"),
    ("CL", "Clinique privée"),
];

/// Funding sectors.
pub const SECTEUR: &[(&str, &str)] = &[
    ("PU", "Public"),
    ("PR", "Privé"),
    ("ESPIC", "Établissement de santé privé d'intérêt collectif"),
];

// ---------------------------------------------------------------------------
// Geographic catalogs
// ---------------------------------------------------------------------------

/// French départements (INSEE codes).
pub const DEPARTEMENTS: &[(&str, &str)] = &[
    ("75", "Paris"),
    ("13", "Bouches-du-Rhône"),
    ("69", "Rhône"),
    ("33", "Gironde"),
    ("59", "Nord"),
    ("31", "Haute-Garonne"),
    ("67", "Bas-Rhin"),
    ("06", "Alpes-Maritimes"),
    ("34", "Hérault"),
    ("44", "Loire-Atlantique"),
];

/// French régions (INSEE codes, post-2016 reform).
pub const REGIONS: &[(&str, &str)] = &[
    ("11", "Île-de-France"),
    ("93", "Provence-Alpes-Côte d'Azur"),
    ("84", "Auvergne-Rhône-Alpes"),
    ("75", "Nouvelle-Aquitaine"),
    ("32", "Hauts-de-France"),
    ("76", "Occitanie"),
    ("52", "Pays de la Loire"),
    ("44", "Grand Est"),
];

/// Commune/IRIS codes for patient residence.
pub const CODEGEO: &[&str] = &["75001", "13001", "69001", "33001", "59001", "31001"];

/// ARS zones and health territories (simplified codes).
pub const ZONES_ARS: &[&str] = &["ZON01", "ZON02", "ZON03", "ZON04"];
pub const TERRITOIRES_SANTE: &[&str] = &["TS01", "TS02", "TS03", "TS04", "TS05"];

// ---------------------------------------------------------------------------
// Medical unit catalog
// ---------------------------------------------------------------------------

/// Medical unit types (RUM nomenclature, 2 digits).
pub const TYPE_UM: &[(&str, &str)] = &[
    ("01", "Médecine"),
    ("02", "Chirurgie"),
    ("03", "Obstétrique"),
    ("04", "Réanimation"),
    ("13", "Soins intensifs"),
    ("18", "Ambulatoire et chirurgie ambulatoire"),
];

// ---------------------------------------------------------------------------
// Drug catalog (UCD + ATC hierarchy)
// ---------------------------------------------------------------------------

/// UCD dispensing-unit codes (7 digits).
pub const UCD: &[(&str, &str)] = &[
    ("9360937", "BEVACIZUMAB 100MG/4ML"),
    ("9261337", "RITUXIMAB 500MG/50ML"),
    ("9340017", "TRASTUZUMAB 150MG"),
    ("9240487", "CETUXIMAB 5MG/ML SOLUTION INJECTABLE"),
    ("9286507", "NIVOLUMAB 10MG/ML SOLUTION INJECTABLE"),
];

/// Five-level ATC classification path for one drug.
#[derive(Debug, Clone, Copy)]
pub struct AtcPath {
    pub atc1: &'static str,
    pub atc2: &'static str,
    pub atc3: &'static str,
    pub atc4: &'static str,
    pub atc5: &'static str,
}

/// ATC hierarchy per UCD code. All entries sit in class L (antineoplastics),
/// the dominant class for costly MCO drugs.
pub const ATC_DATA: &[(&str, AtcPath)] = &[
    (
        "9360937",
        AtcPath { atc1: "L", atc2: "L01", atc3: "L01F", atc4: "L01FG", atc5: "L01FG01" },
    ),
    (
        "9261337",
        AtcPath { atc1: "L", atc2: "L01", atc3: "L01F", atc4: "L01FA", atc5: "L01FA01" },
    ),
    (
        "9340017",
        AtcPath { atc1: "L", atc2: "L01", atc3: "L01F", atc4: "L01FD", atc5: "L01FD01" },
    ),
    (
        "9240487",
        AtcPath { atc1: "L", atc2: "L01", atc3: "L01F", atc4: "L01FE", atc5: "L01FE01" },
    ),
    (
        "9286507",
        AtcPath { atc1: "L", atc2: "L01", atc3: "L01F", atc4: "L01FF", atc5: "L01FF01" },
    ),
];

// ---------------------------------------------------------------------------
// Implantable device catalog (LPP)
// ---------------------------------------------------------------------------

/// LPP device codes (7 digits).
pub const LPP: &[(&str, &str)] = &[
    ("3415677", "PROTHESE TOTALE DE HANCHE"),
    ("3157742", "STIMULATEUR CARDIAQUE DOUBLE CHAMBRE"),
    ("3401024", "PROTHESE TOTALE DE GENOU"),
    ("3401036", "BIOPROTHESE VALVULAIRE AORTIQUE"),
];

/// LPP hierarchy levels.
pub const HIERA_LPP: &[(&str, &str)] = &[
    ("04", "IMPLANTS ARTICULAIRES"),
    ("06", "IMPLANTS CARDIO-VASCULAIRES"),
    ("07", "NEUROCHIRURGIE ET NEUROLOGIE"),
    ("08", "OPHTALMOLOGIE"),
];

// ---------------------------------------------------------------------------
// Pathway catalogs (entry/exit modes)
// ---------------------------------------------------------------------------

/// Entry modes (first digit of the modentprov couple).
pub const MODE_ENTREE: &[(&str, &str)] = &[
    ("6", "Mutation (depuis un autre service du même établissement)"),
    ("7", "Transfert (depuis un autre établissement)"),
    ("8", "Domicile (entrée directe)"),
];

/// Exit modes (first digit of the modsordest couple).
pub const MODE_SORTIE: &[(&str, &str)] = &[
    ("6", "Mutation (vers un autre service du même établissement)"),
    ("7", "Transfert (vers un autre établissement)"),
    ("8", "Retour à domicile"),
    ("9", "Décès"),
];

/// Origins (second digit of the entry couple).
pub const PROVENANCE: &[(&str, &str)] = &[
    ("1", "Domicile"),
    ("2", "MCO"),
    ("3", "SSR"),
    ("4", "Psychiatrie"),
    ("5", "HAD"),
    ("6", "EHPAD"),
];

/// Destinations (second digit of the exit couple).
pub const DESTINATION: &[(&str, &str)] = &[
    ("1", "Domicile"),
    ("2", "MCO"),
    ("3", "SSR"),
    ("4", "Psychiatrie"),
    ("5", "HAD"),
    ("6", "EHPAD"),
];

/// Hospitalization types.
pub const TYPHOSP: &[(&str, &str)] = &[
    ("M", "Médecine"),
    ("C", "Chirurgie"),
    ("O", "Obstétrique"),
];

/// Patient sex.
pub const SEXE: &[(&str, &str)] = &[("1", "Homme"), ("2", "Femme")];

// ---------------------------------------------------------------------------
// Ventilation variables
// ---------------------------------------------------------------------------

/// Compound ventilation names. These contain an underscore themselves and
/// must be matched whole before the `var` string is split on `_`.
pub const COMPOUND_VAR_NAMES: &[&str] = &["sexe_trancheage", "modentprov_modsordest"];

/// Look up a label in a code/label table.
pub fn label_for(table: &[(&'static str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, label)| *label)
}

/// Look up the ATC path for a UCD code.
pub fn atc_for(ucd_code: &str) -> Option<&'static AtcPath> {
    ATC_DATA
        .iter()
        .find(|(code, _)| *code == ucd_code)
        .map(|(_, path)| path)
}

/// The dimension registry: every simple ventilation variable mapped to its
/// value domain.
///
/// Built once at startup with [`Nomenclature::builtin`] and passed by
/// reference into the resolver and the generator. The registry is immutable
/// after construction, so sharing it across request handlers is safe.
pub struct Nomenclature {
    simple: HashMap<&'static str, Vec<VarValue>>,
}

impl Nomenclature {
    /// Build the registry from the built-in catalogs.
    pub fn builtin() -> Self {
        let mut simple: HashMap<&'static str, Vec<VarValue>> = HashMap::new();

        // Demography
        simple.insert("sexe", codes(SEXE));
        simple.insert("typhosp", codes(TYPHOSP));
        simple.insert("passageurg", strings(&["0", "1"]));

        // Temporal
        simple.insert("mois", ints(1..=12));
        simple.insert("duree", ints(0..=15));

        // Clinical classification
        simple.insert("ghm", codes(GHM));
        simple.insert("racine", codes(RACINE_GHM));
        simple.insert("cmd", codes(CMD));
        simple.insert("dp", codes(CIM10));
        simple.insert("dr", codes(CIM10));

        // GHM sub-classifications (simplified codes)
        simple.insert("da", strings(&["01", "02", "03", "04", "05"]));
        simple.insert("ga", strings(&["GA01", "GA02", "GA03", "GA04"]));
        simple.insert("gp", strings(&["GP01", "GP02", "GP03"]));
        simple.insert("aso", strings(&["ASO1", "ASO2", "ASO3"]));
        simple.insert("cas", strings(&["CAS1", "CAS2", "CAS3"]));

        // Facility
        simple.insert("finess", codes(FINESS));
        simple.insert("finessgeo", codes(FINESS));
        simple.insert("categ", codes(CATEG_ETAB));
        simple.insert("secteur", codes(SECTEUR));

        // Facility geography
        simple.insert("regetab", codes(REGIONS));
        simple.insert("depetab", codes(DEPARTEMENTS));
        simple.insert("tsetab", strings(TERRITOIRES_SANTE));
        simple.insert("zonetab", strings(ZONES_ARS));

        // Patient geography
        simple.insert("regpat", codes(REGIONS));
        simple.insert("deppat", codes(DEPARTEMENTS));
        simple.insert("tspat", strings(TERRITOIRES_SANTE));
        simple.insert("codegeo", strings(CODEGEO));
        simple.insert("zonpat", strings(ZONES_ARS));

        // Pathways (simple variables; the compound couple is resolved apart)
        simple.insert("modentprov", strings(&["8_1", "8_5", "6_1", "7_1"]));
        simple.insert("modsordest", strings(&["8_4", "6_1", "7_3", "9_9"]));
        simple.insert("modeeentree", codes(MODE_ENTREE));
        simple.insert("modesortie", codes(MODE_SORTIE));
        simple.insert("provenance", codes(PROVENANCE));
        simple.insert("destination", codes(DESTINATION));

        Self { simple }
    }

    /// Value domain of a simple ventilation variable, if registered.
    pub fn simple_values(&self, token: &str) -> Option<&[VarValue]> {
        self.simple.get(token).map(Vec::as_slice)
    }

    /// Compound names ordered by decreasing length, so a longer compound can
    /// never be shadowed by a shorter one that happens to be a prefix.
    pub fn compound_names(&self) -> Vec<&'static str> {
        let mut names = COMPOUND_VAR_NAMES.to_vec();
        names.sort_by_key(|name| std::cmp::Reverse(name.len()));
        names
    }
}

fn codes(table: &[(&str, &str)]) -> Vec<VarValue> {
    table
        .iter()
        .map(|(code, _)| VarValue::Str((*code).to_string()))
        .collect()
}

fn strings(values: &[&str]) -> Vec<VarValue> {
    values.iter().map(|v| VarValue::Str((*v).to_string())).collect()
}

fn ints(range: std::ops::RangeInclusive<i64>) -> Vec<VarValue> {
    range.map(VarValue::Int).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registers_core_variables() {
        let nomenclature = Nomenclature::builtin();

        assert_eq!(nomenclature.simple_values("sexe").unwrap().len(), 2);
        assert_eq!(nomenclature.simple_values("ghm").unwrap().len(), 8);
        assert_eq!(nomenclature.simple_values("typhosp").unwrap().len(), 3);
        assert_eq!(nomenclature.simple_values("mois").unwrap().len(), 12);
        assert_eq!(nomenclature.simple_values("duree").unwrap().len(), 16);
        assert!(nomenclature.simple_values("inconnu").is_none());
    }

    #[test]
    fn month_domain_is_integer_valued() {
        let nomenclature = Nomenclature::builtin();
        let mois = nomenclature.simple_values("mois").unwrap();

        assert_eq!(mois.first(), Some(&VarValue::Int(1)));
        assert_eq!(mois.last(), Some(&VarValue::Int(12)));
    }

    #[test]
    fn compound_names_are_sorted_longest_first() {
        let nomenclature = Nomenclature::builtin();
        let names = nomenclature.compound_names();

        assert_eq!(names, vec!["modentprov_modsordest", "sexe_trancheage"]);
    }

    #[test]
    fn atc_path_known_for_every_ucd() {
        for (code, _) in UCD {
            let atc = atc_for(code).expect("UCD code without ATC path");
            assert_eq!(atc.atc1, "L");
            assert!(atc.atc5.starts_with(atc.atc4));
        }
    }

    #[test]
    fn label_lookup() {
        assert_eq!(label_for(FINESS, "330781196"), Some("CHU DE BORDEAUX"));
        assert_eq!(label_for(FINESS, "000000000"), None);
    }
}
