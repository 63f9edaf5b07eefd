//! The book outline and the sidebar built from it.
//!
//! The outline is a literal: ten chapters, each a content directory under
//! `src_dir`, each listing its items in reading order. [`build_sidebar`]
//! turns it into the [`NavNode`] forest the engine renders: one collapsible
//! group per chapter, one leaf per item.
//!
//! Items are numbered across the whole book, not per chapter, so the first
//! item of chapter 2 is "Item 6". The leaf text matches the `# heading` each
//! document opens with; [`check`](crate::check) warns when the two drift.

use crate::types::NavNode;

/// One chapter of the book.
#[derive(Debug)]
pub struct Chapter {
    pub title: &'static str,
    /// Content directory under `src_dir`.
    pub dir: &'static str,
    /// `(item title, document slug)` pairs in reading order.
    pub items: &'static [(&'static str, &'static str)],
}

pub const OUTLINE: &[Chapter] = &[
    Chapter {
        title: "Chapter 1: Getting to Know TypeScript",
        dir: "ch-intro",
        items: &[
            ("Understand the Relationship Between TypeScript and JavaScript", "ts-vs-js"),
            ("Know Which TypeScript Options You're Using", "ts-options"),
            ("Understand That Code Generation Is Independent of Types", "independent-codegen"),
            ("Get Comfortable with Structural Typing", "structural-typing"),
            ("Limit Use of the any Type", "limit-any"),
        ],
    },
    Chapter {
        title: "Chapter 2: TypeScript's Type System",
        dir: "ch-types",
        items: &[
            ("Use Your Editor to Interrogate and Explore the Type System", "editor"),
            ("Think of Types as Sets of Values", "types-as-sets"),
            ("Know How to Tell Whether a Symbol Is in the Type Space or Value Space", "type-value-space"),
            ("Prefer Type Annotations to Type Assertions", "type-annotations"),
            ("Avoid Object Wrapper Types (String, Number, Boolean, Symbol, BigInt)", "object-wrapper-types"),
            ("Distinguish Excess Property Checking from Type Checking", "excess-property-checking"),
            ("Apply Types to Entire Function Expressions When Possible", "type-functions"),
            ("Know the Differences Between type and interface", "type-vs-interface"),
            ("Use readonly to Avoid Errors Associated with Mutation", "readonly"),
            ("Use Type Operations and Generic Types to Avoid Repeating Yourself", "type-operations"),
            ("Prefer More Precise Alternatives to Index Signatures", "index-signatures"),
            ("Avoid Numeric Index Signatures", "numeric-index-signatures"),
        ],
    },
    Chapter {
        title: "Chapter 3: Type Inference and Control Flow Analysis",
        dir: "ch-inference",
        items: &[
            ("Avoid Cluttering Your Code with Inferable Types", "inferable-types"),
            ("Use Different Variables for Different Types", "different-variables"),
            ("Understand How a Variable Gets Its Type", "widening"),
            ("Create Objects All at Once", "all-at-once"),
            ("Understand Type Narrowing", "narrowing"),
            ("Be Consistent in Your Use of Aliases", "avoid-aliasing"),
            ("Understand How Context Is Used in Type Inference", "context"),
            ("Understand Evolving Types", "evolving-types"),
            ("Use Functional Constructs and Libraries to Help Types Flow", "functional-libraries"),
            ("Use async Functions Instead of Callbacks to Improve Type Flow", "async-await"),
            ("Use Classes and Currying to Create New Inference Sites", "inference-sites"),
        ],
    },
    Chapter {
        title: "Chapter 4: Type Design",
        dir: "ch-design",
        items: &[
            ("Prefer Types That Always Represent Valid States", "valid-states"),
            ("Be Liberal in What You Accept and Strict in What You Produce", "liberal-accept-strict-produce"),
            ("Don't Repeat Type Information in Documentation", "avoid-repeat-docs"),
            ("Avoid Including null or undefined in Type Aliases", "null-in-type"),
            ("Push Null Values to the Perimeter of Your Types", "null-values-to-perimeter"),
            ("Prefer Unions of Interfaces to Interfaces with Unions", "union-of-interfaces"),
            ("Prefer More Precise Alternatives to String Types", "avoid-strings"),
            ("Use a Distinct Type for Special Values", "special-values"),
            ("Limit the Use of Optional Properties", "avoid-optional"),
            ("Avoid Repeated Parameters of the Same Type", "avoid-same-type-params"),
            ("Prefer Unifying Types to Modeling Differences", "unify-types"),
            ("Prefer Imprecise Types to Inaccurate Types", "avoid-inaccurate-types"),
            ("Name Types Using the Language of Your Problem Domain", "domain-language"),
            ("Avoid Types Based on Anecdotal Data", "avoid-anecdotal-types"),
        ],
    },
    Chapter {
        title: "Chapter 5: Unsoundness and the any Type",
        dir: "ch-any",
        items: &[
            ("Use the Narrowest Possible Scope for any Types", "narrow-any-scope"),
            ("Prefer More Precise Variants of any to Plain any", "precise-any"),
            ("Hide Unsafe Type Assertions in Well-Typed Functions", "hide-assertions"),
            ("Use unknown Instead of any for Values with an Unknown Type", "unknown"),
            ("Prefer Type-Safe Approaches to Monkey Patching", "monkey-patching"),
            ("Avoid Soundness Traps", "soundness-traps"),
            ("Track Your Type Coverage to Prevent Regressions in Type Safety", "type-coverage"),
        ],
    },
    Chapter {
        title: "Chapter 6: Generics and Type-Level Programming",
        dir: "ch-generics",
        items: &[
            ("Think of Generics as Functions Between Types", "functions-for-types"),
            ("Avoid Unnecessary Type Parameters", "golden-rule"),
            ("Prefer Conditional Types to Overload Signatures", "conditional-types"),
            ("Know How to Control the Distribution of Unions over Conditional Types", "control-distribution"),
            ("Use Template Literal Types to Model DSLs and Relationships Between Strings", "template-literal-types"),
            ("Write Tests for Your Types", "type-tests"),
            ("Pay Attention to How Types Display", "type-display"),
            ("Prefer Tail-Recursive Generic Types", "tail-recursion"),
            ("Consider Codegen as an Alternative to Complex Types", "codegen-alternative"),
        ],
    },
    Chapter {
        title: "Chapter 7: TypeScript Recipes",
        dir: "ch-recipes",
        items: &[
            ("Use never Types to Perform Exhaustiveness Checking", "exhaustiveness"),
            ("Know How to Iterate Over Objects", "iterate-objects"),
            ("Use Record Types to Keep Values in Sync", "record-types"),
            ("Use Rest Parameters and Tuple Types to Model Variadic Functions", "variadic-functions"),
            ("Use Optional never Properties to Model Exclusive Or", "exclusive-or"),
            ("Consider Brands for Nominal Typing", "brands"),
        ],
    },
    Chapter {
        title: "Chapter 8: Type Declarations and @types",
        dir: "ch-dts",
        items: &[
            ("Put TypeScript and @types in devDependencies", "dev-dependencies"),
            ("Understand the Three Versions Involved in Type Declarations", "three-versions"),
            ("Export All Types That Appear in Public APIs", "export-types"),
            ("Use TSDoc for API Comments", "tsdoc"),
            ("Provide a Type for this in Callbacks if It's Part of Their API", "this-in-callbacks"),
            ("Mirror Types to Sever Dependencies", "mirror-types"),
            ("Use Module Augmentation to Improve Types", "module-augmentation"),
        ],
    },
    Chapter {
        title: "Chapter 9: Writing and Running Your Code",
        dir: "ch-write-run",
        items: &[
            ("Prefer ECMAScript Features to TypeScript Features", "avoid-non-ecma"),
            ("Use Source Maps to Debug TypeScript", "source-maps"),
            ("Know How to Reconstruct Types at Runtime", "runtime-types"),
            ("Understand the DOM Hierarchy", "dom-hierarchy"),
            ("Create an Accurate Model of Your Environment", "model-env"),
            ("Understand the Relationship Between Type Checking and Unit Testing", "types-or-tests"),
            ("Pay Attention to Compiler Performance", "performance"),
        ],
    },
    Chapter {
        title: "Chapter 10: Modernization and Migration",
        dir: "ch-migrate",
        items: &[
            ("Write Modern JavaScript", "write-modern-js"),
            ("Use @ts-check and JSDoc to Experiment with TypeScript", "ts-check"),
            ("Use allowJs to Mix TypeScript and JavaScript", "allowjs"),
            ("Convert Module by Module Up Your Dependency Graph", "convert-module-by-module"),
            ("Don't Consider Migration Complete Until You Enable noImplicitAny", "migration-complete"),
        ],
    },
];

/// Build the sidebar forest from [`OUTLINE`].
///
/// Pure and deterministic: every call returns an identical tree.
pub fn build_sidebar() -> Vec<NavNode> {
    let mut number = 0;
    OUTLINE
        .iter()
        .map(|chapter| {
            let items = chapter
                .items
                .iter()
                .map(|(title, slug)| {
                    number += 1;
                    NavNode::leaf(
                        format!("Item {number}: {title}"),
                        format!("/{}/{}", chapter.dir, slug),
                    )
                })
                .collect();
            NavNode::group(chapter.title, items).with_collapsed(false)
        })
        .collect()
}

/// Total number of items across all chapters.
pub fn item_count() -> usize {
    OUTLINE.iter().map(|c| c.items.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::{normalize_link, reading_order};
    use std::collections::HashSet;

    #[test]
    fn one_group_per_chapter() {
        let sidebar = build_sidebar();
        assert_eq!(sidebar.len(), OUTLINE.len());
        for (group, chapter) in sidebar.iter().zip(OUTLINE) {
            assert_eq!(group.text, chapter.title);
            assert_eq!(group.items.len(), chapter.items.len());
            assert!(group.link.is_none());
            assert_eq!(group.collapsed, Some(false));
        }
    }

    #[test]
    fn book_has_83_items() {
        assert_eq!(item_count(), 83);
        assert_eq!(reading_order(&build_sidebar()).len(), 83);
    }

    #[test]
    fn rebuild_is_identical() {
        assert_eq!(build_sidebar(), build_sidebar());
    }

    #[test]
    fn items_numbered_across_chapters() {
        let sidebar = build_sidebar();
        assert_eq!(
            sidebar[0].items[0].text,
            "Item 1: Understand the Relationship Between TypeScript and JavaScript"
        );
        assert!(sidebar[1].items[0].text.starts_with("Item 6: "));
        assert_eq!(
            sidebar[9].items[4].text,
            "Item 83: Don't Consider Migration Complete Until You Enable noImplicitAny"
        );
    }

    #[test]
    fn known_items_land_on_their_documents() {
        let sidebar = build_sidebar();
        let order = reading_order(&sidebar);
        let find = |n: usize| order[n - 1];

        assert_eq!(find(23).link.as_deref(), Some("/ch-inference/avoid-aliasing"));
        assert_eq!(
            find(28).text,
            "Item 28: Use Classes and Currying to Create New Inference Sites"
        );
        assert_eq!(find(37).link.as_deref(), Some("/ch-design/avoid-optional"));
        assert_eq!(find(81).link.as_deref(), Some("/ch-migrate/allowjs"));
    }

    #[test]
    fn links_are_unique() {
        let sidebar = build_sidebar();
        let order = reading_order(&sidebar);
        let targets: HashSet<_> = order
            .iter()
            .map(|n| normalize_link(n.link.as_deref().unwrap()))
            .collect();
        assert_eq!(targets.len(), order.len());
    }

    #[test]
    fn chapter_dirs_are_unique() {
        let dirs: HashSet<_> = OUTLINE.iter().map(|c| c.dir).collect();
        assert_eq!(dirs.len(), OUTLINE.len());
    }

    #[test]
    fn first_chapter_precedes_second_when_flattened() {
        let sidebar = build_sidebar();
        let order = reading_order(&sidebar);
        let last_intro = order
            .iter()
            .rposition(|n| n.link.as_deref().unwrap().starts_with("/ch-intro/"))
            .unwrap();
        let first_types = order
            .iter()
            .position(|n| n.link.as_deref().unwrap().starts_with("/ch-types/"))
            .unwrap();
        assert!(last_intro < first_types);
    }
}
