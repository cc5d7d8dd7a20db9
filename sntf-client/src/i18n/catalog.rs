//! Translation tables.

use super::Language;

/// Translation keys, as used by `data-i18n` bindings.
pub mod keys {
    pub const SEARCH_TITLE: &str = "search_title";
    pub const ORIGIN: &str = "origin";
    pub const DESTINATION: &str = "destination";
    pub const DEPARTURE_TIME: &str = "departure_time";
    pub const DAY_OF_WEEK: &str = "day_of_week";
    pub const SEARCH_BTN: &str = "search_btn";
    pub const RESULTS_TITLE: &str = "results_title";
    pub const LINES_TITLE: &str = "lines_title";
    pub const MAP_TITLE: &str = "map_title";
    pub const FOOTER: &str = "footer";
    pub const LOADING: &str = "loading";
    pub const NO_TRAINS_FOUND: &str = "no_trains_found";
    pub const ERROR_LOADING: &str = "error_loading";
    pub const FILL_ALL_FIELDS: &str = "fill_all_fields";
    pub const DEP: &str = "dep";
    pub const ARR: &str = "arr";
    pub const TRAIN: &str = "train";
    pub const SHOW_STOPS: &str = "show_stops";
    pub const HIDE_STOPS: &str = "hide_stops";
    pub const SHOW_PATH: &str = "show_path";
    pub const HIDE_PATH: &str = "hide_path";
    pub const TRANSFER_AT: &str = "transfer_at";
    pub const WAIT_TIME: &str = "wait_time";
    pub const PLACEHOLDER_ORIGIN: &str = "placeholder_origin";
    pub const PLACEHOLDER_DEST: &str = "placeholder_dest";
    pub const BADGE_FASTEST: &str = "badge_fastest";
    pub const BADGE_FAST: &str = "badge_fast";
    pub const BADGE_DIRECT: &str = "badge_direct";
    pub const BADGE_BEST: &str = "badge_best";
    pub const DAY_0: &str = "day_0";
    pub const DAY_1: &str = "day_1";
    pub const DAY_2: &str = "day_2";
    pub const DAY_3: &str = "day_3";
    pub const DAY_4: &str = "day_4";
    pub const DAY_5: &str = "day_5";
    pub const DAY_6: &str = "day_6";

    /// Every key, in table order.
    pub const ALL: &[&str] = &[
        SEARCH_TITLE,
        ORIGIN,
        DESTINATION,
        DEPARTURE_TIME,
        DAY_OF_WEEK,
        SEARCH_BTN,
        RESULTS_TITLE,
        LINES_TITLE,
        MAP_TITLE,
        FOOTER,
        LOADING,
        NO_TRAINS_FOUND,
        ERROR_LOADING,
        FILL_ALL_FIELDS,
        DEP,
        ARR,
        TRAIN,
        SHOW_STOPS,
        HIDE_STOPS,
        SHOW_PATH,
        HIDE_PATH,
        TRANSFER_AT,
        WAIT_TIME,
        PLACEHOLDER_ORIGIN,
        PLACEHOLDER_DEST,
        BADGE_FASTEST,
        BADGE_FAST,
        BADGE_DIRECT,
        BADGE_BEST,
        DAY_0,
        DAY_1,
        DAY_2,
        DAY_3,
        DAY_4,
        DAY_5,
        DAY_6,
    ];
}

/// Static string lookup by language and key.
pub struct Catalog;

impl Catalog {
    /// Look up a string, returning `None` for unknown keys.
    pub fn text(lang: Language, key: &str) -> Option<&'static str> {
        match lang {
            Language::Fr => french(key),
            Language::Ar => arabic(key),
        }
    }

    /// Look up a string, falling back to the key itself.
    pub fn get(lang: Language, key: &str) -> &str {
        Self::text(lang, key).unwrap_or(key)
    }
}

fn french(key: &str) -> Option<&'static str> {
    use keys::*;
    let text = match key {
        SEARCH_TITLE => "Rechercher un train",
        ORIGIN => "Départ",
        DESTINATION => "Arrivée",
        DEPARTURE_TIME => "Heure de départ",
        DAY_OF_WEEK => "Jour",
        SEARCH_BTN => "Rechercher",
        RESULTS_TITLE => "Résultats",
        LINES_TITLE => "Lignes SNTF",
        MAP_TITLE => "Carte du Réseau",
        FOOTER => "Tous droits réservés.",
        LOADING => "Chargement...",
        NO_TRAINS_FOUND => "Aucun train trouvé",
        ERROR_LOADING => "Erreur lors du chargement des résultats.",
        FILL_ALL_FIELDS => "Veuillez remplir tous les champs",
        DEP => "Dép",
        ARR => "Arr",
        TRAIN => "Train",
        SHOW_STOPS => "Voir les arrêts",
        HIDE_STOPS => "Masquer les arrêts",
        SHOW_PATH => "Voir le parcours",
        HIDE_PATH => "Masquer le parcours",
        TRANSFER_AT => "Changement à",
        WAIT_TIME => "Attente",
        PLACEHOLDER_ORIGIN => "Gare de départ...",
        PLACEHOLDER_DEST => "Gare d'arrivée...",
        BADGE_FASTEST => "Le plus rapide",
        BADGE_FAST => "Rapide",
        BADGE_DIRECT => "Direct",
        BADGE_BEST => "Meilleur choix",
        DAY_0 => "Dimanche",
        DAY_1 => "Lundi",
        DAY_2 => "Mardi",
        DAY_3 => "Mercredi",
        DAY_4 => "Jeudi",
        DAY_5 => "Vendredi",
        DAY_6 => "Samedi",
        _ => return None,
    };
    Some(text)
}

fn arabic(key: &str) -> Option<&'static str> {
    use keys::*;
    let text = match key {
        SEARCH_TITLE => "بحث عن رحلة",
        ORIGIN => "الانطلاق",
        DESTINATION => "الوصول",
        DEPARTURE_TIME => "وقت المغادرة",
        DAY_OF_WEEK => "اليوم",
        SEARCH_BTN => "بحث",
        RESULTS_TITLE => "النتائج",
        LINES_TITLE => "خطوط SNTF",
        MAP_TITLE => "خريطة الشبكة",
        FOOTER => "جميع الحقوق محفوظة.",
        LOADING => "جاري التحميل...",
        NO_TRAINS_FOUND => "لا توجد رحلات",
        ERROR_LOADING => "خطأ في تحميل النتائج.",
        FILL_ALL_FIELDS => "يرجى ملء جميع الحقول",
        DEP => "انطلاق",
        ARR => "وصول",
        TRAIN => "قطار",
        SHOW_STOPS => "عرض المحطات",
        HIDE_STOPS => "إخفاء المحطات",
        SHOW_PATH => "عرض المسار",
        HIDE_PATH => "إخفاء المسار",
        TRANSFER_AT => "تغيير في",
        WAIT_TIME => "انتظار",
        PLACEHOLDER_ORIGIN => "محطة الانطلاق...",
        PLACEHOLDER_DEST => "محطة الوصول...",
        BADGE_FASTEST => "الأسرع",
        BADGE_FAST => "سريع",
        BADGE_DIRECT => "مباشر",
        BADGE_BEST => "الأفضل",
        DAY_0 => "الأحد",
        DAY_1 => "الاثنين",
        DAY_2 => "الثلاثاء",
        DAY_3 => "الأربعاء",
        DAY_4 => "الخميس",
        DAY_5 => "الجمعة",
        DAY_6 => "السبت",
        _ => return None,
    };
    Some(text)
}
