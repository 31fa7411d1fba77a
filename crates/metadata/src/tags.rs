use std::collections::HashMap;

const BUILTIN_TAGS: &[(&str, &str)] = &[
    ("Anime", "动画"),
    ("Action", "动作"),
    ("Mystery", "悬疑"),
    ("Tv Movie", "电视"),
    ("Animation", "动画"),
    ("Crime", "犯罪"),
    ("Family", "家庭"),
    ("Fantasy", "奇幻"),
    ("Disaster", "灾难"),
    ("Adventure", "冒险"),
    ("Short", "短片"),
    ("Horror", "恐怖"),
    ("History", "历史"),
    ("Suspense", "悬疑"),
    ("Biography", "传记"),
    ("Sport", "体育"),
    ("Comedy", "喜剧"),
    ("Romance", "爱情"),
    ("Thriller", "惊悚"),
    ("Documentary", "纪录"),
    ("Music", "音乐"),
    ("Sci-Fi", "科幻"),
    ("Western", "西部"),
    ("Children", "儿童"),
    ("Martial Arts", "功夫"),
    ("Drama", "剧情"),
    ("War", "战争"),
    ("Musical", "音乐"),
    ("Film-noir", "黑色"),
    ("Science Fiction", "科幻"),
    ("Food", "食物"),
    ("War & Politics", "战争与政治"),
    ("Sci-Fi & Fantasy", "科幻"),
    ("Mini-Series", "迷你剧"),
    ("Rap", "说唱"),
];

/// Read-only source-tag to localized-tag table.
#[derive(Clone, Debug, Default)]
pub struct TagMap {
    entries: HashMap<String, String>,
}

impl TagMap {
    pub fn builtin() -> Self {
        Self::from_pairs(BUILTIN_TAGS.iter().map(|(from, to)| (*from, *to)))
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = Self::default();
        map.extend(pairs);
        map
    }

    /// Adds entries, replacing existing ones with the same source tag.
    /// Blank keys or values are ignored.
    pub fn extend<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (from, to) in pairs {
            let from: String = from.into();
            let to: String = to.into();
            let from = from.trim();
            let to = to.trim();
            if from.is_empty() || to.is_empty() {
                continue;
            }
            self.entries.insert(from.to_string(), to.to_string());
        }
    }

    /// Localized form of `tag`, or `None` when the table has no entry or the
    /// entry maps the tag onto itself.
    pub fn translate(&self, tag: &str) -> Option<&str> {
        self.entries
            .get(tag)
            .map(|value| value.as_str())
            .filter(|value| *value != tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
