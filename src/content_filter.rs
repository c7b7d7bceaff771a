//! # Content Filter
//!
//! Keeps the ingredient and instruction entries that apply to the active
//! variant. An entry without `onlyForVariation` applies to every variant; a
//! constrained entry only shows when a variant is active and allowed.

use crate::recipe_model::{
    IngredientEntry, IngredientSections, InstructionEntry, LocalizedField, VariantConstraint,
};

/// Entries that may be restricted to some variants
pub trait VariantGated {
    fn variant_constraint(&self) -> Option<&VariantConstraint>;

    /// Whether this entry is shown for the active variant
    fn applies_to(&self, active_variant: Option<&str>) -> bool {
        match self.variant_constraint() {
            None => true,
            Some(constraint) => active_variant
                .filter(|key| !key.is_empty())
                .is_some_and(|key| constraint.allows(key)),
        }
    }
}

impl VariantGated for IngredientEntry {
    fn variant_constraint(&self) -> Option<&VariantConstraint> {
        self.only_for_variation.as_ref()
    }
}

impl VariantGated for InstructionEntry {
    fn variant_constraint(&self) -> Option<&VariantConstraint> {
        self.only_for_variation.as_ref()
    }
}

/// Keep the entries that apply to the active variant, in order
pub fn filter_entries<'a, T: VariantGated>(
    entries: &'a [T],
    active_variant: Option<&str>,
) -> Vec<&'a T> {
    entries
        .iter()
        .filter(|entry| entry.applies_to(active_variant))
        .collect()
}

/// Ingredients of one group after filtering
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredGroup<'a> {
    /// Group title; `None` for a flat ingredient list
    pub name: Option<&'a LocalizedField>,
    pub items: Vec<&'a IngredientEntry>,
}

/// Filter every ingredient group, preserving group order.
///
/// A flat list comes back as a single unnamed group. Groups left empty by
/// the filter are kept so the layout of the recipe does not shift.
pub fn filter_sections<'a>(
    sections: &'a IngredientSections,
    active_variant: Option<&str>,
) -> Vec<FilteredGroup<'a>> {
    match sections {
        IngredientSections::Grouped(groups) => groups
            .iter()
            .map(|group| FilteredGroup {
                name: Some(&group.group),
                items: filter_entries(&group.items, active_variant),
            })
            .collect(),
        IngredientSections::Flat(items) => vec![FilteredGroup {
            name: None,
            items: filter_entries(items, active_variant),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Recipe;

    fn recipe() -> Recipe {
        Recipe::from_json(
            r#"{
                "title": "Burger",
                "ingredients": [
                    {"group": "Patty", "items": [
                        {"ingredient": "beef", "value": 150, "unit": "g", "onlyForVariation": "meat"},
                        {"ingredient": "lentils", "value": 120, "unit": "g", "onlyForVariation": ["veg", "vegan"]},
                        {"ingredient": "salt", "value": 0, "unit": "pinch"}
                    ]},
                    {"group": "Bun", "items": [{"ingredient": "bun", "value": 1}]}
                ],
                "instructions": [
                    {"text": "Grill the patty", "onlyForVariation": "meat"},
                    {"text": "Toast the bun"}
                ]
            }"#,
        )
        .unwrap()
    }

    fn keys(group: &FilteredGroup<'_>) -> Vec<String> {
        group.items.iter().map(|e| e.ingredient.clone()).collect()
    }

    #[test]
    fn test_filter_grouped_ingredients() {
        let recipe = recipe();
        let groups = filter_sections(&recipe.ingredients, Some("vegan"));

        assert_eq!(groups.len(), 2);
        assert_eq!(keys(&groups[0]), vec!["lentils", "salt"]);
        assert_eq!(keys(&groups[1]), vec!["bun"]);
        assert_eq!(groups[1].name.unwrap().resolve("en"), "Bun");
    }

    #[test]
    fn test_no_active_variant_hides_constrained_entries() {
        let recipe = recipe();
        let groups = filter_sections(&recipe.ingredients, None);
        assert_eq!(keys(&groups[0]), vec!["salt"]);

        let groups = filter_sections(&recipe.ingredients, Some(""));
        assert_eq!(keys(&groups[0]), vec!["salt"]);
    }

    #[test]
    fn test_filter_instructions() {
        let recipe = recipe();
        assert_eq!(filter_entries(&recipe.instructions, Some("meat")).len(), 2);
        assert_eq!(filter_entries(&recipe.instructions, Some("veg")).len(), 1);
    }

    #[test]
    fn test_flat_list_is_single_unnamed_group() {
        let sections = IngredientSections::Flat(vec![]);
        let groups = filter_sections(&sections, Some("meat"));
        assert_eq!(groups.len(), 1);
        assert!(groups[0].name.is_none());
    }
}
