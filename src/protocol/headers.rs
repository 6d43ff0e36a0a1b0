use hyper::header::{HeaderMap, HeaderName, HeaderValue};

/// 순서가 보존되는 헤더 목록
///
/// 전송 계층의 `(이름, 값)` 쌍 목록을 그대로 표현합니다.
/// `HeaderName`은 항상 소문자로 정규화되므로 이름 비교는 대소문자를 구분하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    entries: Vec<(HeaderName, HeaderValue)>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&HeaderName, &HeaderValue)> {
        self.entries.iter().map(|(name, value)| (name, value))
    }

    /// 첫 번째로 일치하는 헤더 값을 반환합니다.
    pub fn get(&self, name: &HeaderName) -> Option<&HeaderValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn get_all<'a>(&'a self, name: &HeaderName) -> impl Iterator<Item = &'a HeaderValue> + 'a {
        let name = name.clone();
        self.entries
            .iter()
            .filter(move |(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, name: &HeaderName) -> bool {
        self.entries.iter().any(|(key, _)| key == name)
    }

    /// 기존 값을 유지한 채 끝에 추가합니다.
    pub fn append(&mut self, name: HeaderName, value: HeaderValue) {
        self.entries.push((name, value));
    }

    /// 첫 번째 항목을 제자리에서 교체하고 나머지 중복 항목은 제거합니다.
    /// 일치하는 항목이 없으면 끝에 추가합니다.
    pub fn set(&mut self, name: HeaderName, value: HeaderValue) {
        match self.entries.iter().position(|(key, _)| *key == name) {
            Some(first) => {
                self.entries[first].1 = value;
                let mut index = 0;
                self.entries.retain(|(key, _)| {
                    let keep = index <= first || *key != name;
                    index += 1;
                    keep
                });
            }
            None => self.entries.push((name, value)),
        }
    }

    /// 일치하는 모든 항목을 제거하고 제거된 개수를 반환합니다.
    pub fn remove(&mut self, name: &HeaderName) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(key, _)| key != name);
        before - self.entries.len()
    }

    /// 흐름이 응답 뷰에 설정한 헤더를 병합합니다.
    ///
    /// `overrides`에 있는 이름은 기존 값을 모두 대체하며, 첫 번째 기존 항목의 위치를 유지합니다.
    /// 같은 이름의 값이 여러 개라면 마지막 값만 남기지 않고 모두 그 위치에 순서대로 들어갑니다.
    pub fn merge(&mut self, overrides: &HeaderMap) {
        for name in overrides.keys() {
            let values: Vec<HeaderValue> = overrides.get_all(name).iter().cloned().collect();
            let position = self.entries.iter().position(|(key, _)| key == name);
            self.entries.retain(|(key, _)| key != name);

            let at = position.unwrap_or(self.entries.len());
            for (offset, value) in values.into_iter().enumerate() {
                self.entries.insert(at + offset, (name.clone(), value));
            }
        }
    }

    pub fn to_header_map(&self) -> HeaderMap {
        let mut map = HeaderMap::with_capacity(self.entries.len());
        for (name, value) in &self.entries {
            map.append(name.clone(), value.clone());
        }
        map
    }
}

impl From<&HeaderMap> for HeaderList {
    fn from(map: &HeaderMap) -> Self {
        Self {
            entries: map
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(HeaderName, HeaderValue)> for HeaderList {
    fn from_iter<I: IntoIterator<Item = (HeaderName, HeaderValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for HeaderList {
    type Item = (HeaderName, HeaderValue);
    type IntoIter = std::vec::IntoIter<(HeaderName, HeaderValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> HeaderName {
        HeaderName::from_bytes(s.as_bytes()).unwrap()
    }

    fn value(s: &str) -> HeaderValue {
        HeaderValue::from_str(s).unwrap()
    }

    #[test]
    fn test_set_replaces_first_and_drops_duplicates() {
        let mut list: HeaderList = vec![
            (name("set-cookie"), value("a=1")),
            (name("content-type"), value("text/plain")),
            (name("set-cookie"), value("b=2")),
        ]
        .into_iter()
        .collect();

        list.set(name("Set-Cookie"), value("c=3"));

        let pairs: Vec<_> = list.iter().map(|(k, v)| (k.as_str(), v.to_str().unwrap())).collect();
        assert_eq!(pairs, vec![("set-cookie", "c=3"), ("content-type", "text/plain")]);
    }

    #[test]
    fn test_merge_keeps_position_and_unrelated_headers() {
        let mut list: HeaderList = vec![
            (name("x-a"), value("1")),
            (name("x-b"), value("2")),
            (name("x-c"), value("3")),
        ]
        .into_iter()
        .collect();

        let mut overrides = HeaderMap::new();
        overrides.insert(name("X-B"), value("20"));
        overrides.insert(name("x-d"), value("4"));

        list.merge(&overrides);

        let pairs: Vec<_> = list.iter().map(|(k, v)| (k.as_str(), v.to_str().unwrap())).collect();
        assert_eq!(pairs, vec![("x-a", "1"), ("x-b", "20"), ("x-c", "3"), ("x-d", "4")]);
    }

    #[test]
    fn test_merge_multi_value_override() {
        let mut list: HeaderList = vec![(name("vary"), value("accept"))].into_iter().collect();

        let mut overrides = HeaderMap::new();
        overrides.append(name("vary"), value("origin"));
        overrides.append(name("vary"), value("cookie"));

        list.merge(&overrides);

        let values: Vec<_> = list.get_all(&name("vary")).map(|v| v.to_str().unwrap()).collect();
        assert_eq!(values, vec!["origin", "cookie"]);
    }

    #[test]
    fn test_remove_counts_entries() {
        let mut list = HeaderList::new();
        list.append(name("x-a"), value("1"));
        list.append(name("x-a"), value("2"));
        list.append(name("x-b"), value("3"));

        assert_eq!(list.remove(&name("X-A")), 2);
        assert_eq!(list.len(), 1);
        assert!(!list.contains(&name("x-a")));
    }
}
