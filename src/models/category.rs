//! Category reference list.
//!
//! The catalog is static and not user-editable. Each category carries an
//! explicit [`TransactionType`] kind, so income and expense categories are
//! told apart by that field rather than by name.

use serde::{Deserialize, Serialize};

use super::{CategoryIcon, CategoryId, TransactionType};

/// A transaction category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name, also the key stored on transactions and budgets.
    pub name: String,
    /// Icon tag resolved by the presentation layer.
    pub icon: CategoryIcon,
    /// Whether the category classifies income or expenses.
    pub kind: TransactionType,
}

/// Built-in categories: `(id, name, icon, kind)`.
const BUILTIN: [(&str, &str, CategoryIcon, TransactionType); 8] = [
    ("1", "Salário", CategoryIcon::DollarSign, TransactionType::Income),
    ("2", "Moradia", CategoryIcon::Home, TransactionType::Expense),
    ("3", "Alimentação", CategoryIcon::Utensils, TransactionType::Expense),
    ("4", "Transporte", CategoryIcon::Car, TransactionType::Expense),
    ("5", "Investimentos", CategoryIcon::TrendingUp, TransactionType::Expense),
    ("6", "Lazer", CategoryIcon::Gift, TransactionType::Expense),
    ("7", "Saúde", CategoryIcon::Heart, TransactionType::Expense),
    ("8", "Educação", CategoryIcon::GraduationCap, TransactionType::Expense),
];

/// Read-only list of categories offered at transaction entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCatalog {
    /// Categories in display order.
    categories: Vec<Category>,
}

impl Default for CategoryCatalog {
    #[inline]
    fn default() -> Self {
        let categories = BUILTIN
            .iter()
            .map(|&(id, name, icon, kind)| Category {
                id: CategoryId::new(id.to_owned()),
                name: name.to_owned(),
                icon,
                kind,
            })
            .collect();
        Self { categories }
    }
}

impl CategoryCatalog {
    /// Creates a catalog from an explicit list.
    #[inline]
    #[must_use]
    pub const fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Returns every category in display order.
    #[inline]
    #[must_use]
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    /// Finds a category by exact name.
    #[inline]
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|cat| cat.name == name)
    }

    /// Returns the icon for a category name, falling back to
    /// [`CategoryIcon::FALLBACK`] for names missing from the catalog.
    #[inline]
    #[must_use]
    pub fn icon_for(&self, name: &str) -> CategoryIcon {
        self.find(name).map_or(CategoryIcon::FALLBACK, |cat| cat.icon)
    }

    /// Returns the categories offered for the given transaction type.
    #[inline]
    pub fn of_kind(&self, kind: TransactionType) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |cat| cat.kind == kind)
    }

    /// Returns the category pre-selected when entering a transaction of the
    /// given type: the first category of that kind.
    #[inline]
    #[must_use]
    pub fn default_for(&self, kind: TransactionType) -> Option<&Category> {
        self.of_kind(kind).next()
    }
}
