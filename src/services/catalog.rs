//! Curated reading list keyed by weak topic.

use crate::db::models::BookRecommendation;

const MIN_RECOMMENDATIONS: usize = 3;

struct CatalogEntry {
    topic: &'static str,
    title: &'static str,
    author: &'static str,
}

const CATALOG: [CatalogEntry; 10] = [
    CatalogEntry {
        topic: "Recursion",
        title: "Structure and Interpretation of Computer Programs",
        author: "Abelson & Sussman",
    },
    CatalogEntry {
        topic: "Dynamic Programming",
        title: "Introduction to Algorithms",
        author: "Thomas H. Cormen",
    },
    CatalogEntry {
        topic: "Graph Theory",
        title: "Graph Theory with Applications",
        author: "Bondy & Murty",
    },
    CatalogEntry {
        topic: "Data Structures",
        title: "Data Structures and Algorithm Analysis",
        author: "Mark Allen Weiss",
    },
    CatalogEntry {
        topic: "Sorting Algorithms",
        title: "The Art of Computer Programming Vol. 3",
        author: "Donald Knuth",
    },
    CatalogEntry {
        topic: "Trees & BST",
        title: "Algorithms in Java",
        author: "Robert Sedgewick",
    },
    CatalogEntry {
        topic: "Time Complexity",
        title: "Algorithm Design Manual",
        author: "Steven Skiena",
    },
    CatalogEntry {
        topic: "Memory Management",
        title: "Computer Systems: A Programmer's Perspective",
        author: "Bryant & O'Hallaron",
    },
    CatalogEntry {
        topic: "Object-Oriented Design",
        title: "Clean Code",
        author: "Robert C. Martin",
    },
    CatalogEntry {
        topic: "Database Normalization",
        title: "Database System Concepts",
        author: "Silberschatz, Korth & Sudarshan",
    },
];

const FALLBACKS: [(CatalogEntry, u8); 2] = [
    (
        CatalogEntry {
            topic: "General CS",
            title: "Cracking the Coding Interview",
            author: "Gayle Laakmann McDowell",
        },
        85,
    ),
    (
        CatalogEntry {
            topic: "Algorithms",
            title: "Grokking Algorithms",
            author: "Aditya Bhargava",
        },
        80,
    ),
];

/// Topics the catalogue has a book for, in catalogue order.
pub(crate) fn catalog_topics() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|entry| entry.topic)
}

/// One book per weak topic found in the catalogue (input order), then the
/// general fallbacks until at least three entries exist or they run out.
/// `match_percentage` is asked once per matched topic.
pub(crate) fn recommend_from_catalog<T, F>(weak_topics: &[T], mut match_percentage: F) -> Vec<BookRecommendation>
where
    T: AsRef<str>,
    F: FnMut(&str) -> u8,
{
    let mut recommendations: Vec<BookRecommendation> = weak_topics
        .iter()
        .filter_map(|topic| {
            let topic = topic.as_ref();
            CATALOG.iter().find(|entry| entry.topic == topic)
        })
        .map(|entry| BookRecommendation {
            title: entry.title.to_string(),
            author: entry.author.to_string(),
            topic: entry.topic.to_string(),
            match_percentage: match_percentage(entry.topic),
        })
        .collect();

    for (entry, percentage) in &FALLBACKS {
        if recommendations.len() >= MIN_RECOMMENDATIONS {
            break;
        }
        recommendations.push(BookRecommendation {
            title: entry.title.to_string(),
            author: entry.author.to_string(),
            topic: entry.topic.to_string(),
            match_percentage: *percentage,
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matched_topics_keep_input_order() {
        let recs = recommend_from_catalog(
            &["Time Complexity", "Recursion", "Graph Theory", "Unknown"],
            |_| 90,
        );
        let topics: Vec<&str> = recs.iter().map(|r| r.topic.as_str()).collect();
        assert_eq!(topics, vec!["Time Complexity", "Recursion", "Graph Theory"]);
        assert!(recs.iter().all(|r| r.match_percentage == 90));
    }

    #[test]
    fn tops_up_with_fallbacks() {
        let recs = recommend_from_catalog(&["Recursion"], |_| 78);
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[1].title, "Cracking the Coding Interview");
        assert_eq!(recs[1].match_percentage, 85);
        assert_eq!(recs[2].title, "Grokking Algorithms");
        assert_eq!(recs[2].match_percentage, 80);
    }

    #[test]
    fn fallbacks_run_out_at_two() {
        let recs = recommend_from_catalog::<&str, _>(&[], |_| 0);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].topic, "General CS");
        assert_eq!(recs[1].topic, "Algorithms");
    }

    #[test]
    fn no_fallback_once_three_matched() {
        let topics: Vec<&str> = catalog_topics().take(4).collect();
        let recs = recommend_from_catalog(&topics, |_| 88);
        assert_eq!(recs.len(), 4);
        assert!(recs.iter().all(|r| r.topic != "General CS"));
    }
}
