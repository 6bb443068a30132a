//! Naming conventions for generated code
//!
//! Every generator derives table names, route segments and variables from
//! the same [`ModelNames`], so a controller and its migration always agree.

use inflector::Inflector;
use serde::Serialize;

/// Names derived from a normalised model class name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelNames {
    /// Class name, e.g. `BlogPost`
    pub class: String,
    /// `blog_post`
    pub snake: String,
    /// `blog_posts`
    pub table: String,
    /// `blog-posts`
    pub route: String,
    /// `blogPost`
    pub variable: String,
    /// `blogPosts`
    pub plural_variable: String,
}

impl ModelNames {
    /// Derive every name from `model`
    ///
    /// ```
    /// # use api_toolkit::naming::ModelNames;
    /// let names = ModelNames::new("Category");
    /// assert_eq!(names.table, "categories");
    /// assert_eq!(names.route, "categories");
    /// assert_eq!(names.plural_variable, "categories");
    /// ```
    #[must_use]
    pub fn new(model: &str) -> Self {
        let snake = model.to_snake_case();
        Self {
            class: model.to_string(),
            table: snake.to_plural(),
            route: model.to_kebab_case().to_plural(),
            variable: model.to_camel_case(),
            plural_variable: model.to_plural().to_camel_case(),
            snake,
        }
    }
}

/// Uppercase the first character and leave the rest untouched
///
/// ```
/// # use api_toolkit::naming::ucfirst;
/// assert_eq!(ucfirst("post"), "Post");
/// assert_eq!(ucfirst("blogPost"), "BlogPost");
/// ```
#[must_use]
pub fn ucfirst(input: &str) -> String {
    let mut chars = input.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Relation method for a foreign key column: `parent_category_id` → `parentCategory`
#[must_use]
pub fn relation_method(column: &str) -> String {
    strip_key_suffix(column).to_camel_case()
}

/// Table a foreign key points at when no target is given: `author_id` → `authors`
#[must_use]
pub fn referenced_table(column: &str) -> String {
    strip_key_suffix(column).to_snake_case().to_plural()
}

/// Model class stored in `table`: `user_profiles` → `UserProfile`
#[must_use]
pub fn table_model(table: &str) -> String {
    table.to_singular().to_pascal_case()
}

fn strip_key_suffix(column: &str) -> &str {
    column.strip_suffix("_id").unwrap_or(column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ucfirst() {
        assert_eq!(ucfirst("Post"), "Post");
        assert_eq!(ucfirst("user_profile"), "User_profile");
        assert_eq!(ucfirst(""), "");
    }

    #[test]
    fn test_model_names() {
        let names = ModelNames::new("UserProfile");
        assert_eq!(names.snake, "user_profile");
        assert_eq!(names.table, "user_profiles");
        assert_eq!(names.route, "user-profiles");
        assert_eq!(names.variable, "userProfile");
        assert_eq!(names.plural_variable, "userProfiles");

        let post = ModelNames::new("Post");
        assert_eq!(post.table, "posts");
        assert_eq!(post.variable, "post");
    }

    #[test]
    fn test_foreign_key_names() {
        assert_eq!(relation_method("author_id"), "author");
        assert_eq!(relation_method("parent_category_id"), "parentCategory");
        assert_eq!(referenced_table("author_id"), "authors");
        assert_eq!(referenced_table("category_id"), "categories");
        assert_eq!(table_model("users"), "User");
        assert_eq!(table_model("user_profiles"), "UserProfile");
    }
}
