//! # Recipe Session and Display Rows
//!
//! A [`RecipeSession`] holds everything that belongs to one opened recipe:
//! the document, the user's working yield and the active variant. Opening a
//! session always runs in the same order: load preferences, capture the
//! baseline area, select the variant. Every later yield change is written back
//! to the preference store immediately.
//!
//! Opening another recipe means creating a new session; nothing carries over
//! from the previous one except what was persisted.

use log::{debug, info, warn};

use crate::content_filter::{filter_entries, filter_sections};
use crate::iconography::IconTable;
use crate::localization::Translations;
use crate::multiplier::compute_multiplier;
use crate::portion_model::{Portion, Shape, WorkingPortionState};
use crate::preferences::{KeyValueStore, PreferenceStore, RecipeContext};
use crate::quantity_format::{format_value, pluralize};
use crate::recipe_model::Recipe;
use crate::route::Route;
use crate::shape_converter::{convert_to, step_rectangle};
use crate::variant_selector::{record_variant_choice, select_variant};

/// One formatted ingredient line
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientRow {
    pub emoji: String,
    /// Scaled amount; empty for entries without an amount
    pub value: String,
    /// Translated unit
    pub unit: String,
    /// Unit key as written in the document
    pub unit_key: Option<String>,
    /// Word between unit and name (e.g. "of"), if the unit has one
    pub connector: String,
    pub name: String,
    pub text: String,
}

/// Rows of one ingredient group
#[derive(Debug, Clone, PartialEq)]
pub struct IngredientGroupView {
    /// Translated group title; `None` for a flat list
    pub name: Option<String>,
    pub items: Vec<IngredientRow>,
}

/// One preparation step
#[derive(Debug, Clone, PartialEq)]
pub struct InstructionRow {
    pub text: String,
    pub image: Option<String>,
}

/// Direction of a yield adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Increment,
    Decrement,
}

impl Step {
    fn delta(self) -> i32 {
        match self {
            Step::Increment => 1,
            Step::Decrement => -1,
        }
    }
}

/// Format the ingredient groups of a recipe for a multiplier and variant
pub fn render_ingredients(
    recipe: &Recipe,
    multiplier: f64,
    variant: Option<&str>,
    translations: &Translations,
    icons: &IconTable,
) -> Vec<IngredientGroupView> {
    filter_sections(&recipe.ingredients, variant)
        .into_iter()
        .map(|group| IngredientGroupView {
            name: group.name.map(|name| translations.translate_field(name)),
            items: group
                .items
                .into_iter()
                .map(|entry| {
                    let unit_key = entry.unit.clone().filter(|u| !u.is_empty());
                    let (unit, connector) = match unit_key.as_deref() {
                        Some(key) => (
                            translations.t_or(&format!("units.{key}"), key),
                            translations.t_or(&format!("connectors.{key}"), ""),
                        ),
                        None => (String::new(), String::new()),
                    };

                    let (value, name) = if entry.value == 0.0 {
                        let name = translations
                            .t_or(&format!("ingredients.{}", entry.ingredient), &entry.ingredient);
                        (String::new(), name)
                    } else {
                        let scaled = entry.value * multiplier;
                        let name =
                            pluralize(translations, &entry.ingredient, scaled, unit_key.as_deref());
                        (format_value(scaled), name)
                    };

                    IngredientRow {
                        emoji: icons.icon_for(&entry.ingredient).to_string(),
                        value,
                        unit,
                        unit_key,
                        connector,
                        name,
                        text: entry
                            .text
                            .as_ref()
                            .map(|text| translations.translate_field(text))
                            .unwrap_or_default(),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Format the instructions of a recipe for a variant
pub fn render_instructions(
    recipe: &Recipe,
    variant: Option<&str>,
    translations: &Translations,
) -> Vec<InstructionRow> {
    filter_entries(&recipe.instructions, variant)
        .into_iter()
        .map(|entry| InstructionRow {
            text: translations.translate_field(&entry.text),
            image: entry.image.clone(),
        })
        .collect()
}

/// State of one opened recipe
#[derive(Debug, Clone)]
pub struct RecipeSession {
    recipe_id: String,
    recipe: Recipe,
    state: WorkingPortionState,
    variant: Option<String>,
}

impl RecipeSession {
    /// Open a recipe: load preferences, capture the baseline, pick the variant
    pub fn open<S: KeyValueStore>(
        recipe_id: &str,
        recipe: Recipe,
        explicit_variant: Option<&str>,
        preferences: &mut PreferenceStore<S>,
    ) -> Self {
        let mut state =
            preferences.load(Some(RecipeContext::new(recipe_id, recipe.portion.as_ref())));
        state.capture_baseline(recipe.portion.as_ref());
        let variant = select_variant(&recipe, explicit_variant, recipe_id, preferences);

        info!(
            "Opened recipe '{}' with variant {:?}",
            recipe_id, variant
        );

        Self {
            recipe_id: recipe_id.to_string(),
            recipe,
            state,
            variant,
        }
    }

    pub fn recipe_id(&self) -> &str {
        &self.recipe_id
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn state(&self) -> &WorkingPortionState {
        &self.state
    }

    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    fn portion(&self) -> Option<&Portion> {
        self.recipe.portion.as_ref()
    }

    /// Current scale factor for ingredient quantities
    pub fn multiplier(&self) -> f64 {
        compute_multiplier(self.portion(), &self.state)
    }

    /// Location hash for this session
    pub fn route(&self) -> Route {
        Route {
            recipe: Some(self.recipe_id.clone()),
            variant: self.variant.clone(),
        }
    }

    fn persist<S: KeyValueStore>(&self, preferences: &mut PreferenceStore<S>) {
        let context = RecipeContext::new(&self.recipe_id, self.portion());
        if let Err(e) = preferences.save(Some(context), &self.state) {
            warn!("Could not save preferences for '{}': {}", self.recipe_id, e);
        }
    }

    /// Increase the target yield by one step
    pub fn increment<S: KeyValueStore>(&mut self, preferences: &mut PreferenceStore<S>) {
        self.step(Step::Increment, preferences);
    }

    /// Decrease the target yield by one step
    pub fn decrement<S: KeyValueStore>(&mut self, preferences: &mut PreferenceStore<S>) {
        self.step(Step::Decrement, preferences);
    }

    /// Adjust the target yield; recipes without a portion are left untouched
    pub fn step<S: KeyValueStore>(&mut self, step: Step, preferences: &mut PreferenceStore<S>) {
        let config = preferences.config().clone();
        let delta = step.delta();
        let state = &mut self.state;

        match self.recipe.portion.as_ref() {
            Some(Portion::Servings { .. }) => {
                state.current_servings = config
                    .servings_bounds
                    .clamp(state.current_servings.saturating_add_signed(delta));
            }
            Some(Portion::Units { .. }) => {
                state.current_units = config
                    .units_bounds
                    .clamp(state.current_units.saturating_add_signed(delta));
            }
            Some(Portion::Diameter { .. }) => {
                state.current_diameter = config
                    .diameter_bounds
                    .clamp(state.current_diameter.saturating_add_signed(delta));
            }
            Some(Portion::Area { .. }) => {
                if state.displayed_shape().is_some_and(|shape| shape.is_circular()) {
                    let dimensions = &mut state.current_dimensions;
                    dimensions.diameter = config
                        .diameter_bounds
                        .clamp(dimensions.diameter.saturating_add_signed(delta));
                } else {
                    state.current_dimensions =
                        step_rectangle(&state.current_dimensions, delta, config.side_bounds);
                }
            }
            None => return,
        }

        debug!("Stepped '{}' {:?}: {:?}", self.recipe_id, step, self.state);
        self.persist(preferences);
    }

    /// Switch the displayed pan shape of an area recipe.
    ///
    /// The displayed dimensions are converted to keep roughly the same area;
    /// the baseline captured at open time is left as it was.
    pub fn set_shape<S: KeyValueStore>(&mut self, shape: Shape, preferences: &mut PreferenceStore<S>) {
        if !matches!(self.portion(), Some(Portion::Area { .. })) {
            debug!("Ignoring shape change for non-area recipe '{}'", self.recipe_id);
            return;
        }

        if let Some(from) = self.state.displayed_shape() {
            self.state.current_dimensions = convert_to(from, &self.state.current_dimensions, shape);
        }
        self.state.current_shape = Some(shape);
        self.persist(preferences);
    }

    /// Switch to another variant chosen by the user and remember it
    pub fn set_variant<S: KeyValueStore>(
        &mut self,
        variant_key: &str,
        preferences: &mut PreferenceStore<S>,
    ) {
        record_variant_choice(&self.recipe_id, variant_key, preferences);
        self.variant = Some(variant_key.to_string()).filter(|key| !key.is_empty());
    }

    /// Heading of the ingredient list reflecting the current yield
    pub fn ingredients_title(&self, translations: &Translations) -> String {
        let label = translations.t_or("ingredients._", "Ingredients");
        let Some(portion) = self.portion() else {
            return label;
        };

        let connector = translations.t_or("connectors.for", "for");
        let unit_key = portion.unit();
        let unit = translations.t_or(&format!("units.{unit_key}"), unit_key);
        let state = &self.state;

        let amount = match portion {
            Portion::Servings { .. } => state.current_servings.to_string(),
            Portion::Units { .. } => state.current_units.to_string(),
            Portion::Diameter { .. } => format!("ø {}", state.current_diameter),
            Portion::Area { .. } => match state.displayed_shape() {
                Some(Shape::Circular) => format!("ø {}", state.current_dimensions.diameter),
                _ => format!(
                    "{} × {}",
                    state.current_dimensions.width, state.current_dimensions.height
                ),
            },
        };

        format!("{label} {connector} {amount} {unit}").trim_end().to_string()
    }

    /// Formatted ingredient groups for the active variant and yield
    pub fn ingredient_groups(
        &self,
        translations: &Translations,
        icons: &IconTable,
    ) -> Vec<IngredientGroupView> {
        render_ingredients(
            &self.recipe,
            self.multiplier(),
            self.variant(),
            translations,
            icons,
        )
    }

    /// Instructions for the active variant
    pub fn instructions(&self, translations: &Translations) -> Vec<InstructionRow> {
        render_instructions(&self.recipe, self.variant(), translations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::InMemoryStore;
    use serde_json::json;

    fn translations() -> Translations {
        Translations::new(
            "en",
            json!({
                "ingredients": {"_": "Ingredients", "egg": "eggs", "egg_single": "egg", "sugar": "sugar"},
                "units": {"persons": "persons", "g": "g", "cm": "cm"},
                "connectors": {"for": "for", "g": "of"}
            }),
        )
    }

    fn omelette() -> Recipe {
        Recipe::from_json(
            r#"{
                "title": "Omelette",
                "portion": {"type": "servings", "value": 2, "unit": "persons"},
                "ingredients": [
                    {"ingredient": "egg", "value": 1},
                    {"ingredient": "sugar", "value": 0, "unit": "g"}
                ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_servings_title_and_rows() {
        let mut store = PreferenceStore::new(InMemoryStore::new());
        let session = RecipeSession::open("omelette", omelette(), None, &mut store);
        let tr = translations();

        assert_eq!(session.ingredients_title(&tr), "Ingredients for 4 persons");
        let groups = session.ingredient_groups(&tr, &IconTable::new());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].items[0].value, "2");
        assert_eq!(groups[0].items[0].name, "eggs");
        assert_eq!(groups[0].items[0].emoji, "🥚");
    }

    #[test]
    fn test_zero_value_row_has_no_amount() {
        let mut store = PreferenceStore::new(InMemoryStore::new());
        let session = RecipeSession::open("omelette", omelette(), None, &mut store);
        let groups = session.ingredient_groups(&translations(), &IconTable::new());
        let sugar = &groups[0].items[1];

        assert_eq!(sugar.value, "");
        assert_eq!(sugar.unit, "g");
        assert_eq!(sugar.connector, "of");
        assert_eq!(sugar.name, "sugar");
    }

    #[test]
    fn test_singular_after_decrement() {
        let mut store = PreferenceStore::new(InMemoryStore::new());
        let mut session = RecipeSession::open("omelette", omelette(), None, &mut store);
        session.decrement(&mut store);
        session.decrement(&mut store);

        assert_eq!(session.state().current_servings, 2);
        let groups = session.ingredient_groups(&translations(), &IconTable::new());
        assert_eq!(groups[0].items[0].value, "1");
        assert_eq!(groups[0].items[0].name, "egg");
    }

    #[test]
    fn test_servings_clamped() {
        let mut store = PreferenceStore::new(InMemoryStore::new());
        let mut session = RecipeSession::open("omelette", omelette(), None, &mut store);
        for _ in 0..30 {
            session.increment(&mut store);
        }
        assert_eq!(session.state().current_servings, 20);
        for _ in 0..30 {
            session.decrement(&mut store);
        }
        assert_eq!(session.state().current_servings, 1);
    }

    #[test]
    fn test_no_portion_title() {
        let recipe = Recipe::from_json(r#"{"title": "Salad"}"#).unwrap();
        let mut store = PreferenceStore::new(InMemoryStore::new());
        let mut session = RecipeSession::open("salad", recipe, None, &mut store);
        session.increment(&mut store);

        assert_eq!(session.ingredients_title(&translations()), "Ingredients");
        assert_eq!(session.multiplier(), 1.0);
    }

    #[test]
    fn test_route_of_session() {
        let recipe = Recipe::from_json(
            r#"{"title": "Chili", "variants": [{"key": "meat", "name": "Meat"}]}"#,
        )
        .unwrap();
        let mut store = PreferenceStore::new(InMemoryStore::new());
        let session = RecipeSession::open("chili", recipe, None, &mut store);
        assert_eq!(session.route().to_hash(), "#recipe=chili&variant=meat");
    }
}
