// src/seed.rs
//
// Startup provisioning: the admin account from config and, on request, a
// starter catalog for an empty store.

use crate::{
    config::Config,
    error::AppError,
    models::{
        category::NewCategory,
        question::{Difficulty, NewQuestion, Tags},
    },
    state::AppState,
    utils::gate::Authority,
};

/// (name, label) pairs, in presentation order.
const DEFAULT_CATEGORIES: &[(&str, &str)] = &[
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("react", "React"),
    ("vue", "Vue"),
    ("css", "CSS"),
    ("html", "HTML"),
    ("browser", "Browser"),
    ("performance", "Performance"),
    ("engineering", "Engineering"),
    ("algorithm", "Algorithms"),
    ("network", "Network"),
    ("data-structure", "Data Structures"),
];

struct SampleQuestion {
    category: &'static str,
    title: &'static str,
    content: &'static str,
    answer: &'static str,
    difficulty: Difficulty,
    tags: &'static str,
    is_favorite: bool,
}

const SAMPLE_QUESTIONS: &[SampleQuestion] = &[
    SampleQuestion {
        category: "javascript",
        title: "What is the difference between var, let and const?",
        content: "<p>Compare hoisting, scope and redeclaration rules of var, let and const.</p>",
        answer: "<ul><li><b>var</b> is function scoped and hoisted as undefined.</li>\
                 <li><b>let/const</b> are block scoped and sit in the temporal dead zone until declared.</li>\
                 <li><b>const</b> bindings cannot be reassigned.</li></ul>",
        difficulty: Difficulty::Easy,
        tags: "ES6,scope,variables",
        is_favorite: true,
    },
    SampleQuestion {
        category: "javascript",
        title: "What is a closure and where is it useful?",
        content: "<p>Explain closures and give practical use cases.</p>",
        answer: "<p>A closure is a function that keeps access to the variables of the scope \
                 it was created in. Typical uses: private state, currying, debounce/throttle.</p>",
        difficulty: Difficulty::Medium,
        tags: "closures,scope",
        is_favorite: true,
    },
    SampleQuestion {
        category: "react",
        title: "What does the useEffect dependency array do?",
        content: "<p>Explain how the dependency array controls when an effect re-runs.</p>",
        answer: "<ul><li><code>[]</code> runs once after mount.</li>\
                 <li>Listed values re-run the effect when they change.</li>\
                 <li>No array runs after every render.</li></ul>",
        difficulty: Difficulty::Medium,
        tags: "hooks,useEffect",
        is_favorite: false,
    },
    SampleQuestion {
        category: "css",
        title: "Flexbox vs Grid: when to use which?",
        content: "<p>Compare the two layout systems and their typical use cases.</p>",
        answer: "<p>Flexbox is one-dimensional and content driven; Grid is two-dimensional \
                 and suits page-level layout.</p>",
        difficulty: Difficulty::Easy,
        tags: "layout,flexbox,grid",
        is_favorite: false,
    },
    SampleQuestion {
        category: "network",
        title: "What changed between HTTP/1.1 and HTTP/2?",
        content: "<p>Describe the main protocol improvements in HTTP/2.</p>",
        answer: "<p>Binary framing, multiplexed streams over one connection, header \
                 compression (HPACK) and server push.</p>",
        difficulty: Difficulty::Hard,
        tags: "HTTP,protocol",
        is_favorite: false,
    },
];

/// Creates the configured admin account if it does not exist yet.
pub async fn seed_admin(state: &AppState, config: &Config) -> Result<(), AppError> {
    if let (Some(username), Some(password)) = (&config.admin_username, &config.admin_password) {
        if state.credentials.provision(username, password).await? {
            tracing::info!("Seeded admin user: {}", username);
        }
    }
    Ok(())
}

/// Seeds default categories and a handful of questions. No-op unless the
/// category table is empty.
pub async fn seed_sample_data(state: &AppState) -> Result<(), AppError> {
    if !state.categories.list().await?.is_empty() {
        tracing::info!("Catalog already populated, skipping sample data");
        return Ok(());
    }

    let mut ids = std::collections::HashMap::new();
    for (order, (name, label)) in DEFAULT_CATEGORIES.iter().enumerate() {
        let category = state
            .categories
            .create(
                Authority::FullWrite,
                NewCategory {
                    name: name.to_string(),
                    label: label.to_string(),
                    sort_order: i32::try_from(order).unwrap_or(i32::MAX),
                },
            )
            .await?;
        ids.insert(*name, category.id);
    }

    for sample in SAMPLE_QUESTIONS {
        let Some(category_id) = ids.get(sample.category) else {
            continue;
        };
        state
            .questions
            .create(
                Authority::FullWrite,
                NewQuestion {
                    title: sample.title.to_string(),
                    content: sample.content.to_string(),
                    answer: sample.answer.to_string(),
                    category_id: category_id.clone(),
                    difficulty: sample.difficulty,
                    tags: Tags::from_storage(sample.tags),
                    is_favorite: sample.is_favorite,
                },
            )
            .await?;
    }

    tracing::info!(
        categories = DEFAULT_CATEGORIES.len(),
        questions = SAMPLE_QUESTIONS.len(),
        "Seeded sample catalog"
    );
    Ok(())
}
