use std::rc::Rc;

use crate::{error, sequence};

/// A Metapath array.
///
/// Not to be confused with a sequence, this is a type of item that can
/// exist in a sequence when you need an actual list. Each member is a
/// sequence of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Array(pub(crate) Rc<Vec<sequence::Sequence>>);

impl Array {
    pub fn new(vec: Vec<sequence::Sequence>) -> Self {
        Self(vec.into())
    }

    pub(crate) fn join(arrays: &[Self]) -> Self {
        let mut vec = Vec::with_capacity(arrays.iter().map(|array| array.0.len()).sum());
        for array in arrays {
            vec.extend(array.0.iter().cloned());
        }
        Self::new(vec)
    }

    /// The member at a 0-based index.
    pub fn index(&self, index: usize) -> Option<&sequence::Sequence> {
        self.0.get(index)
    }

    /// The member at a 1-based position, as used by lookups and the array
    /// functions. Positions outside the array are `FOAY0001`.
    pub(crate) fn member(&self, position: &ibig::IBig) -> error::Result<&sequence::Sequence> {
        let index = self.position_to_index(position)?;
        self.0.get(index).ok_or(error::Error::FOAY0001)
    }

    pub(crate) fn position_to_index(&self, position: &ibig::IBig) -> error::Result<usize> {
        let position: usize = position.try_into().map_err(|_| error::Error::FOAY0001)?;
        if position == 0 {
            return Err(error::Error::FOAY0001);
        }
        Ok(position - 1)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &sequence::Sequence> {
        self.0.iter()
    }

    pub(crate) fn put(&self, index: usize, member: &sequence::Sequence) -> Option<Self> {
        if index >= self.0.len() {
            return None;
        }
        let mut vec = self.0.as_ref().to_vec();
        vec[index] = member.clone();
        Some(Self::new(vec))
    }

    pub(crate) fn append(&self, appendage: &sequence::Sequence) -> Self {
        let mut vec = self.0.as_ref().to_vec();
        vec.push(appendage.clone());
        Self::new(vec)
    }

    pub(crate) fn subarray(&self, start: usize, length: usize) -> Option<Self> {
        if start > self.0.len() || (start + length) > self.0.len() {
            return None;
        }
        Some(Self::new(self.0[start..start + length].to_vec()))
    }

    pub(crate) fn remove_positions(&self, positions: &[usize]) -> Option<Self> {
        if positions.iter().any(|position| *position >= self.0.len()) {
            return None;
        }
        let vec = self
            .0
            .iter()
            .enumerate()
            .filter(|(i, _)| !positions.contains(i))
            .map(|(_, member)| member.clone())
            .collect();
        Some(Self::new(vec))
    }

    pub(crate) fn reversed(&self) -> Self {
        let mut vec = self.0.as_ref().to_vec();
        vec.reverse();
        Self::new(vec)
    }

    pub(crate) fn insert_before(
        &self,
        position: usize,
        member: &sequence::Sequence,
    ) -> Option<Self> {
        if position > self.0.len() {
            return None;
        }
        let mut vec = self.0.as_ref().to_vec();
        vec.insert(position, member.clone());
        Some(Self::new(vec))
    }

    /// Flatten the members into a single sequence, recursing into nested
    /// arrays.
    pub(crate) fn flatten(&self) -> Vec<sequence::Item> {
        let mut result = Vec::new();
        for member in self.0.iter() {
            for item in member.iter() {
                match item.to_array() {
                    Ok(array) => result.extend(array.flatten()),
                    Err(_) => result.push(item.clone()),
                }
            }
        }
        result
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn deep_equal(
        &self,
        other: &Array,
        default_offset: chrono::FixedOffset,
    ) -> error::Result<bool> {
        if self.0.len() != other.0.len() {
            return Ok(false);
        }
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            if !a.deep_equal(b, default_offset)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn display_representation(&self) -> String {
        let members = self
            .0
            .iter()
            .map(|member| member.display_representation())
            .collect::<Vec<_>>();
        format!("[{}]", members.join(", "))
    }
}

impl From<Vec<sequence::Sequence>> for Array {
    fn from(vec: Vec<sequence::Sequence>) -> Self {
        Self::new(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ibig::ibig;

    fn array(values: &[i64]) -> Array {
        Array::new(
            values
                .iter()
                .map(|v| sequence::Sequence::from(crate::atomic::Atomic::from(*v)))
                .collect(),
        )
    }

    #[test]
    fn test_member_positions() {
        let a = array(&[10, 20]);
        assert_eq!(
            a.member(&ibig!(2)).unwrap(),
            &sequence::Sequence::from(crate::atomic::Atomic::from(20i64))
        );
        assert_eq!(a.member(&ibig!(0)), Err(error::Error::FOAY0001));
        assert_eq!(a.member(&ibig!(3)), Err(error::Error::FOAY0001));
    }

    #[test]
    fn test_flatten_nested() {
        let inner = array(&[2, 3]);
        let outer = Array::new(vec![
            sequence::Sequence::from(crate::atomic::Atomic::from(1i64)),
            sequence::Sequence::from(inner),
        ]);
        assert_eq!(outer.flatten().len(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(array(&[1, 2]).display_representation(), "[1, 2]");
    }
}
